//! Core types for argbind configuration

use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::Arc;

/// Source of environment variables
///
/// The registry reads every declared `env_name` through this trait so tests can
/// supply variables without touching the process environment.
pub trait EnvSource: Send + Sync {
    /// Look up a variable, `None` when unset
    ///
    /// Values are returned raw; the registry rejects ones that are not valid
    /// Unicode instead of treating them as unset.
    fn var_os(&self, name: &str) -> Option<OsString>;
}

/// Reads from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var_os(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

/// In-memory environment, useful for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvSource {
    vars: HashMap<String, OsString>,
}

impl MemoryEnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable (builder pattern)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OsString>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<OsString>> FromIterator<(K, V)> for MemoryEnvSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MemoryEnvSource {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }
}

/// Configuration for initializing a [`Registry`](crate::Registry)
#[derive(Clone)]
pub struct RegistryConfig {
    /// Program name shown in usage output
    pub app_name: String,

    /// One-line description shown above the flag list
    pub about: Option<String>,

    /// Where environment variables are read from
    pub env_source: Arc<dyn EnvSource>,

    /// Fail binding when a tagged key has no loaded argument
    pub strict_binding: bool,
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("app_name", &self.app_name)
            .field("about", &self.about)
            .field("strict_binding", &self.strict_binding)
            .finish_non_exhaustive()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            app_name: "app".into(),
            about: None,
            env_source: Arc::new(DefaultEnvSource),
            strict_binding: false,
        }
    }
}

impl RegistryConfig {
    /// Create a new builder for `RegistryConfig`
    ///
    /// # Example
    /// ```rust
    /// use argbind::{MemoryEnvSource, RegistryConfig};
    ///
    /// let config = RegistryConfig::builder("my-app")
    ///     .about("Serves things")
    ///     .env_source(MemoryEnvSource::new().with("PORT", "9000"))
    ///     .strict_binding(true)
    ///     .build();
    ///
    /// assert_eq!(config.app_name, "my-app");
    /// assert!(config.strict_binding);
    /// ```
    pub fn builder(app_name: impl Into<String>) -> RegistryConfigBuilder {
        RegistryConfigBuilder::new(app_name)
    }
}

/// Builder for creating `RegistryConfig` with a fluent API
#[derive(Clone)]
pub struct RegistryConfigBuilder {
    config: RegistryConfig,
}

impl RegistryConfigBuilder {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            config: RegistryConfig {
                app_name: app_name.into(),
                ..Default::default()
            },
        }
    }

    /// Set the description shown in usage output
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.config.about = Some(about.into());
        self
    }

    /// Read environment variables from `source` instead of the process
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.config.env_source = Arc::new(source);
        self
    }

    /// Make binding fail on tagged keys that were never loaded
    pub fn strict_binding(mut self, strict: bool) -> Self {
        self.config.strict_binding = strict;
        self
    }

    pub fn build(self) -> RegistryConfig {
        self.config
    }
}
