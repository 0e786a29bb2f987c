//! Builder for Registry
//!
//! This module contains [`RegistryBuilder`] which provides a fluent API
//! for creating a [`Registry`](super::Registry).

use crate::config::{EnvSource, RegistryConfigBuilder};

use super::Registry;

/// Builder for creating a [`Registry`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use argbind::{MemoryEnvSource, Registry};
///
/// let registry = Registry::builder("my-app")
///     .about("Does useful things")
///     .env_source(MemoryEnvSource::new().with("APP_PORT", "9000"))
///     .build();
///
/// assert_eq!(registry.config().app_name, "my-app");
/// ```
pub struct RegistryBuilder {
    config_builder: RegistryConfigBuilder,
}

impl RegistryBuilder {
    /// Create a new builder with the program name used in usage output.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            config_builder: RegistryConfigBuilder::new(app_name),
        }
    }

    /// Set the one-line description shown above the flag list.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.about(about);
        self
    }

    /// Read environment variables from `source` instead of the process.
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.config_builder = self.config_builder.env_source(source);
        self
    }

    /// Fail binding when a tagged key was never loaded.
    ///
    /// By default such fields are left untouched.
    pub fn strict_binding(mut self, strict: bool) -> Self {
        self.config_builder = self.config_builder.strict_binding(strict);
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        Registry::with_config(self.config_builder.build())
    }
}
