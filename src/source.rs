//! Declaration sources
//!
//! Reads schema files into [`Declarations`]. JSON is always available; TOML and
//! YAML are behind the `toml` and `yaml` features and accept the same shape.

use crate::config::Argument;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Declarations keyed by lower-cased argument name
pub type Declarations = BTreeMap<String, Argument>;

/// Trait for schema file formats
///
/// This allows reading declarations from JSON, TOML, or YAML.
pub trait SchemaFormat {
    /// File extension for this format (e.g., "json", "toml")
    fn extension(&self) -> &str;

    /// Decode a document into a name → declaration map
    fn decode_map<T: DeserializeOwned>(&self, content: &str) -> std::result::Result<T, String>;
}

// =============================================================================
// Formats
// =============================================================================

/// JSON schema files (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl SchemaFormat for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn decode_map<T: DeserializeOwned>(&self, content: &str) -> std::result::Result<T, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

/// TOML schema files
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

#[cfg(feature = "toml")]
impl SchemaFormat for TomlFormat {
    fn extension(&self) -> &str {
        "toml"
    }

    fn decode_map<T: DeserializeOwned>(&self, content: &str) -> std::result::Result<T, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

/// YAML schema files
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

#[cfg(feature = "yaml")]
impl SchemaFormat for YamlFormat {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn decode_map<T: DeserializeOwned>(&self, content: &str) -> std::result::Result<T, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Decode `content` with `format`, lower-casing every argument name
///
/// `origin` only labels errors.
///
/// # Errors
///
/// Returns [`Error::Decode`] for malformed documents and for names that
/// collide once lower-cased.
pub fn parse_declarations<F: SchemaFormat>(
    format: &F,
    content: &str,
    origin: &Path,
) -> Result<Declarations> {
    let raw: HashMap<String, Argument> =
        format.decode_map(content).map_err(|reason| Error::Decode {
            path: origin.to_path_buf(),
            reason,
        })?;

    let mut declarations = Declarations::new();
    for (name, argument) in raw {
        let key = name.to_lowercase();
        if declarations.insert(key.clone(), argument).is_some() {
            return Err(Error::Decode {
                path: origin.to_path_buf(),
                reason: format!("argument '{key}' is declared more than once"),
            });
        }
    }
    Ok(declarations)
}

/// Read and decode a schema file with an explicit format
///
/// # Errors
///
/// Returns [`Error::FileRead`] when the file cannot be read, otherwise see
/// [`parse_declarations`].
pub fn read_declarations_with<F: SchemaFormat>(format: &F, path: &Path) -> Result<Declarations> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_declarations(format, &content, path)
}

/// Read a schema file, choosing the format from its extension
///
/// Files without an extension, or with one no enabled format claims, are
/// decoded as JSON.
///
/// # Errors
///
/// Returns [`Error::FileRead`] or [`Error::Decode`], see
/// [`read_declarations_with`].
pub fn read_declarations(path: &Path) -> Result<Declarations> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "toml")]
        "toml" => read_declarations_with(&TomlFormat, path),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => read_declarations_with(&YamlFormat, path),
        _ => read_declarations_with(&JsonFormat, path),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_parse_lowercases_names() {
        let content = r#"{
            "Port": {"default": 8080, "type": "uint", "flag_name": "port"},
            "S3_BUCKET": {"env_name": "S3_BUCKET"}
        }"#;

        let declarations = parse_declarations(&JsonFormat, content, Path::new("inline")).unwrap();

        assert_eq!(
            declarations.keys().collect::<Vec<_>>(),
            vec!["port", "s3_bucket"]
        );
        assert_eq!(declarations["port"].default, json!(8080));
    }

    #[test]
    fn test_parse_rejects_case_collision() {
        let content = r#"{"port": {}, "PORT": {}}"#;
        let err = parse_declarations(&JsonFormat, content, Path::new("inline")).unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_parse_malformed_document() {
        let err =
            parse_declarations(&JsonFormat, "{not json", Path::new("broken.json")).unwrap_err();

        match err {
            Error::Decode { path, .. } => assert_eq!(path, Path::new("broken.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"workers": {"type": "uint8", "default": 4}}"#).unwrap();

        let declarations = read_declarations(&path).unwrap();
        assert_eq!(declarations["workers"].type_name, "uint8");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_declarations(Path::new("/nonexistent/config.json"));

        assert!(matches!(result.unwrap_err(), Error::FileRead { .. }));
    }

    #[test]
    fn test_read_falls_back_to_json() {
        let dir = tempdir().unwrap();
        let content = r#"{"Port": {"type": "uint16", "default": 8080}}"#;

        for file_name in ["arguments", "arguments.conf"] {
            let path = dir.path().join(file_name);
            std::fs::write(&path, content).unwrap();

            let declarations = read_declarations(&path).unwrap();
            assert_eq!(declarations["port"].type_name, "uint16", "{file_name}");
        }

        let path = dir.path().join("broken.ini");
        std::fs::write(&path, "[section]").unwrap();
        assert!(matches!(
            read_declarations(&path).unwrap_err(),
            Error::Decode { .. }
        ));
    }
}
