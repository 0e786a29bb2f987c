//! Integration tests for argbind-derive macro
//!
//! Tests the `#[derive(Bind)]` macro with various attribute combinations.

mod common;

use argbind::{Argument, Bind, Error, Registry, ValueType};
use common::{empty_registry, fixture_path, registry_with_env};

// =============================================================================
// Basic Derive Tests
// =============================================================================

#[derive(Debug, Default, PartialEq, Bind)]
struct ServiceConfig {
    #[config("port")]
    port: u64,

    #[config("s3_bucket")]
    my_bucket: String,

    // Not tagged: never touched by binding
    started: bool,
}

#[test]
fn test_bind_from_fixture_leaves_missing_key() {
    let mut registry = empty_registry();
    registry.load_file(fixture_path("config.json")).unwrap();
    assert_eq!(registry.len(), 2);

    let mut config = ServiceConfig {
        started: true,
        ..Default::default()
    };
    registry.bind(&mut config).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.my_bucket, "");
    assert!(config.started);
}

#[test]
fn test_bind_picks_up_env_and_flags() {
    let mut registry = registry_with_env(&[("S3_BUCKET", "uploads"), ("PORT", "9000")]);
    registry
        .load([
            ("port", Argument::uint(8080).env("PORT").flag("port")),
            ("S3_Bucket", Argument::string("").env("S3_BUCKET")),
        ])
        .unwrap();
    registry.parse_args(["svc", "--port", "7000"]).unwrap();

    let mut config = ServiceConfig::default();
    config.bind_from(&registry).unwrap();

    assert_eq!(
        config,
        ServiceConfig {
            port: 7000,
            my_bucket: "uploads".into(),
            started: false,
        }
    );
}

// =============================================================================
// Attribute Forms
// =============================================================================

#[derive(Debug, Default, Bind)]
struct Limits {
    #[config(key = "MAX_CONNS")]
    max_conns: u16,

    #[config(key = "queue_depth")]
    queue_depth: Option<u32>,
}

#[derive(Debug, Default, Bind)]
struct AppConfig {
    #[config("name")]
    name: String,

    #[config(flatten)]
    limits: Limits,
}

#[test]
fn test_key_form_and_flatten() {
    let mut registry = empty_registry();
    registry
        .load([
            ("name", Argument::string("api")),
            ("max_conns", Argument::typed(ValueType::Uint16, 512)),
            ("queue_depth", Argument::without_default(ValueType::Uint32)),
        ])
        .unwrap();

    let mut config = AppConfig::default();
    config.limits.queue_depth = Some(10);
    registry.bind(&mut config).unwrap();

    assert_eq!(config.name, "api");
    assert_eq!(config.limits.max_conns, 512);
    assert_eq!(config.limits.queue_depth, None);
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Default, Bind)]
struct Narrow {
    #[config("port")]
    port: u8,
}

#[test]
fn test_type_mismatch_names_field() {
    let mut registry = empty_registry();
    registry.load([("port", Argument::uint(8080))]).unwrap();

    let err = registry.bind(&mut Narrow::default()).unwrap_err();

    match err {
        Error::TypeMismatch { field, expected, .. } => {
            assert_eq!(field, "port");
            assert_eq!(expected, "u8");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[derive(Debug, Default, Bind)]
struct Secrets {
    #[config("token")]
    token: String,
}

#[test]
fn test_required_argument_without_value() {
    let mut registry = empty_registry();
    registry
        .load([(
            "token",
            Argument::without_default(ValueType::String)
                .env("TOKEN")
                .required(),
        )])
        .unwrap();

    let err = registry.bind(&mut Secrets::default()).unwrap_err();
    assert!(matches!(err, Error::MissingRequired(ref name) if name == "token"));
}

#[test]
fn test_strict_binding_catches_typos() {
    let mut registry = Registry::builder("svc").strict_binding(true).build();
    registry.load([("port", Argument::uint(8080))]).unwrap();

    let err = registry.bind(&mut ServiceConfig::default()).unwrap_err();
    assert!(err.is_not_found());
}
