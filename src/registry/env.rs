//! Environment variable handling for arguments
//!
//! Helper struct to encapsulate reading and coercing declared env vars.

use crate::config::{EnvSource, ValueType};
use crate::error::{Error, Result};
use crate::value::Value;
use log::debug;
use std::sync::Arc;

/// Handles environment variable lookups and coercion
#[derive(Clone)]
pub(crate) struct EnvironmentHandler {
    source: Arc<dyn EnvSource>,
}

impl EnvironmentHandler {
    pub fn new(source: Arc<dyn EnvSource>) -> Self {
        Self { source }
    }

    /// Read `env_name` and coerce it for the argument `name`
    ///
    /// An unset variable is `Ok(None)`; a set but malformed one is an error,
    /// including one that is not valid Unicode.
    pub fn read(&self, name: &str, env_name: &str, value_type: ValueType) -> Result<Option<Value>> {
        let Some(raw) = self.source.var_os(env_name) else {
            return Ok(None);
        };
        let raw = raw.into_string().map_err(|raw| {
            Error::parse(
                name,
                raw.to_string_lossy(),
                format!("{env_name} is not valid Unicode"),
            )
        })?;
        let value = value_type.coerce_str(name, &raw)?;
        debug!("Environment override for '{name}' from {env_name}");
        Ok(Some(value))
    }
}
