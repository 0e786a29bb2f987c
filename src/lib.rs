//! # argbind - Typed configuration from defaults, environment and flags
//!
//! argbind merges three sources into one typed value table and binds the result
//! onto your own structs:
//!
//! - **Defaults** declared in a schema file (or in code)
//! - **Environment variables** read once, when declarations are loaded
//! - **Command-line flags** parsed with `clap`
//!
//! Precedence is always flag > environment > default, and a flag only wins when
//! it was actually given on the command line.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use argbind::Registry;
//!
//! # fn main() -> argbind::Result<()> {
//! let mut registry = Registry::builder("my-app").about("Serves things").build();
//! registry.load_file("config.json")?;
//! registry.parse_env_args()?;
//!
//! let port = registry.get_uint("port")?.unwrap_or(8080);
//! # Ok(())
//! # }
//! ```
//!
//! ## Schema Files
//!
//! ```json
//! {
//!   "port": {
//!     "description": "Port the HTTP listener binds to",
//!     "default": 8080,
//!     "env_name": "APP_PORT",
//!     "flag_name": "port",
//!     "type": "uint16"
//!   },
//!   "s3_bucket": {
//!     "env_name": "S3_BUCKET",
//!     "type": "string",
//!     "required": true
//!   }
//! }
//! ```
//!
//! Supported types are `string`, `uint`, `uint8`, `uint16`, `uint32` and
//! `uint64`. Names are case-insensitive. TOML and YAML schemas are available
//! behind the `toml` and `yaml` features.
//!
//! ## Binding
//!
//! ```rust,ignore
//! use argbind::{Bind, Registry};
//!
//! #[derive(Default, Bind)]
//! struct ServerConfig {
//!     #[config("port")]
//!     port: u16,
//!     #[config("s3_bucket")]
//!     bucket: String,
//! }
//!
//! let mut config = ServerConfig::default();
//! registry.bind(&mut config)?;
//! ```

mod bind;
mod error;
mod registry;
mod value;

pub mod config;
pub mod source;

pub use bind::{Bind, FromValue};
pub use error::{Error, Result};
pub use registry::{ArgumentInfo, Registry, RegistryBuilder, ResolvedValue, Source};
pub use value::Value;

pub use config::{
    Argument, DefaultEnvSource, EnvSource, MemoryEnvSource, RegistryConfig, RegistryConfigBuilder,
    ValueType,
};
pub use source::{Declarations, JsonFormat, SchemaFormat, parse_declarations, read_declarations};

#[cfg(feature = "toml")]
pub use source::TomlFormat;

#[cfg(feature = "yaml")]
pub use source::YamlFormat;

/// Derive macro for [`Bind`] implementations.
///
/// Tag fields with `#[config("key")]` or `#[config(key = "key")]`; use
/// `#[config(flatten)]` on a field whose type also implements [`Bind`].
///
/// # Example
///
/// ```rust,ignore
/// use argbind::Bind;
///
/// #[derive(Default, Bind)]
/// struct Limits {
///     #[config("max_conns")]
///     max_conns: u32,
/// }
/// ```
#[cfg(feature = "derive")]
pub use argbind_derive::Bind;
