//! Argument declarations and declared value types
//!
//! # Overview
//!
//! An [`Argument`] is the static description of one configurable value: where it
//! may come from (a command-line flag, an environment variable, a default) and
//! which [`ValueType`] the raw input must be coerced into.
//!
//! Declarations usually come from a schema file (see [`crate::source`]) but can
//! also be built in code:
//!
//! ```rust
//! use argbind::Argument;
//!
//! let port = Argument::uint(8080)
//!     .flag("port")
//!     .env("APP_PORT")
//!     .description("Port the HTTP listener binds to");
//!
//! let bucket = Argument::string("")
//!     .env("S3_BUCKET")
//!     .required();
//!
//! assert_eq!(port.flag_name.as_deref(), Some("port"));
//! assert!(bucket.required);
//! ```
//!
//! # Schema Shape
//!
//! ```json
//! {
//!   "port": {
//!     "description": "Port the HTTP listener binds to",
//!     "default": 8080,
//!     "env_name": "APP_PORT",
//!     "flag_name": "port",
//!     "type": "uint16",
//!     "required": false
//!   }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::error::{Error, Result};
use crate::value::Value;

// =============================================================================
// Value Types
// =============================================================================

/// Declared type of an argument, controlling coercion of raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// UTF-8 text, passed through unchanged
    String,
    /// Unsigned integer, 64 bits wide
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl ValueType {
    /// All supported types, in declaration order
    pub const ALL: [ValueType; 6] = [
        ValueType::String,
        ValueType::Uint,
        ValueType::Uint8,
        ValueType::Uint16,
        ValueType::Uint32,
        ValueType::Uint64,
    ];

    /// Parse a declared `type` string for the argument `name`
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for anything outside the known set.
    pub fn from_declared(name: &str, type_name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == type_name)
            .ok_or_else(|| Error::UnsupportedType {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
    }

    /// The name used for this type in schema files
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Uint => "uint",
            ValueType::Uint8 => "uint8",
            ValueType::Uint16 => "uint16",
            ValueType::Uint32 => "uint32",
            ValueType::Uint64 => "uint64",
        }
    }

    /// Whether this type belongs to the unsigned integer family
    pub fn is_uint(&self) -> bool {
        !matches!(self, ValueType::String)
    }

    /// Largest value representable by this type (`None` for strings)
    pub fn max_value(&self) -> Option<u64> {
        match self {
            ValueType::String => None,
            ValueType::Uint8 => Some(u64::from(u8::MAX)),
            ValueType::Uint16 => Some(u64::from(u16::MAX)),
            ValueType::Uint32 => Some(u64::from(u32::MAX)),
            ValueType::Uint | ValueType::Uint64 => Some(u64::MAX),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Argument Declaration
// =============================================================================

fn default_type_name() -> String {
    ValueType::String.as_str().to_string()
}

/// Treat `""` the same as a missing source name.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

/// Static description of one configurable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Help text, shown in flag usage
    #[serde(default)]
    pub description: String,

    /// Untyped default (`null` or missing means no default)
    #[serde(default)]
    pub default: JsonValue,

    /// Environment variable to read at load time
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub env_name: Option<String>,

    /// Long command-line flag (without the leading `--`)
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub flag_name: Option<String>,

    /// Declared type, kept raw so unknown names surface at load time
    #[serde(rename = "type", default = "default_type_name")]
    pub type_name: String,

    /// Fail resolution when no source yields a value
    #[serde(default)]
    pub required: bool,
}

impl Default for Argument {
    fn default() -> Self {
        Self {
            description: String::new(),
            default: JsonValue::Null,
            env_name: None,
            flag_name: None,
            type_name: default_type_name(),
            required: false,
        }
    }
}

impl Argument {
    // =========================================================================
    // Type-specific constructors
    // =========================================================================

    /// Create a string argument
    pub fn string(default: impl Into<String>) -> Self {
        Self {
            default: JsonValue::String(default.into()),
            ..Default::default()
        }
    }

    /// Create a 64-bit unsigned argument
    pub fn uint(default: u64) -> Self {
        Self::typed(ValueType::Uint, default)
    }

    /// Create an argument of any declared type with a JSON default
    pub fn typed(value_type: ValueType, default: impl Into<JsonValue>) -> Self {
        Self {
            default: default.into(),
            type_name: value_type.as_str().to_string(),
            ..Default::default()
        }
    }

    /// Create an argument with no default
    pub fn without_default(value_type: ValueType) -> Self {
        Self::typed(value_type, JsonValue::Null)
    }

    // =========================================================================
    // Source setters (builder pattern)
    // =========================================================================

    /// Read this argument from the given environment variable
    #[must_use]
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.env_name = Some(name.into()).filter(|n| !n.is_empty());
        self
    }

    /// Expose this argument as `--<name>`
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.flag_name = Some(name.into()).filter(|n| !n.is_empty());
        self
    }

    /// Set the help text
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Mark the argument as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    // =========================================================================
    // Coercion
    // =========================================================================

    /// Resolve the declared type string
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] when `type` is not recognized.
    pub fn value_type(&self, name: &str) -> Result<ValueType> {
        ValueType::from_declared(name, &self.type_name)
    }

    /// Coerce the untyped default into `value_type`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the default does not fit the declared type.
    pub fn typed_default(&self, name: &str, value_type: ValueType) -> Result<Option<Value>> {
        value_type.coerce_json(name, &self.default)
    }

    /// Whether the argument can only ever resolve to its default
    pub fn is_default_only(&self) -> bool {
        self.env_name.is_none() && self.flag_name.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
