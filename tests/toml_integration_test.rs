//! TOML Schema Integration Tests
//!
//! Declarations read from TOML behave the same as JSON ones.

#![cfg(feature = "toml")]

mod common;

use argbind::{Error, TomlFormat, Value, ValueType, parse_declarations, read_declarations};
use common::{fixture_path, registry_with_env};
use std::path::Path;

#[test]
fn test_toml_declarations_are_lowercased() {
    let declarations = read_declarations(&fixture_path("config.toml")).unwrap();

    assert_eq!(
        declarations.keys().collect::<Vec<_>>(),
        vec!["port", "s3_bucket"]
    );
    assert_eq!(declarations["port"].type_name, "uint16");
    assert!(declarations["s3_bucket"].required);
}

#[test]
fn test_toml_integer_default_and_env() {
    let mut registry = registry_with_env(&[("S3_BUCKET", "uploads")]);
    registry.load_file(fixture_path("config.toml")).unwrap();

    assert_eq!(
        registry.resolve("port").unwrap(),
        Some(Value::Uint {
            ty: ValueType::Uint16,
            value: 8080
        })
    );
    assert_eq!(
        registry.get_string("s3_bucket").unwrap().as_deref(),
        Some("uploads")
    );
}

#[test]
fn test_toml_malformed() {
    let err = parse_declarations(&TomlFormat, "[port\n", Path::new("bad.toml")).unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}
