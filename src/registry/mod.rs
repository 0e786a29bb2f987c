//! Argument registry
//!
//! This module contains the [`Registry`] struct which is the primary entry point:
//! it owns the value table, the registered flags, and the environment source.

mod builder;
mod env;
pub(crate) mod flags;
mod load;
mod resolve;
mod resolved;

pub use builder::RegistryBuilder;
pub use resolve::ArgumentInfo;
pub use resolved::{ResolvedValue, Source};

use crate::config::RegistryConfig;
use env::EnvironmentHandler;
use flags::FlagSet;
use std::collections::HashMap;

/// Typed value table built from argument declarations.
///
/// A registry is owned by the caller; independent registries share nothing, so
/// tests can each build their own. Mutation goes through `&mut self` and is not
/// synchronized.
///
/// # Lifecycle
///
/// 1. [`load`](Registry::load) declarations (repeatable, additive)
/// 2. [`parse_args`](Registry::parse_args) the command line
/// 3. [`resolve`](Registry::resolve) values or [`bind`](Registry::bind) them onto a struct
/// 4. [`reset`](Registry::reset) to start over
///
/// # Example
///
/// ```rust
/// use argbind::{Argument, MemoryEnvSource, Registry, Value, ValueType};
///
/// let mut registry = Registry::builder("server")
///     .env_source(MemoryEnvSource::new().with("APP_PORT", "9000"))
///     .build();
///
/// registry.load([
///     ("port", Argument::typed(ValueType::Uint16, 8080).env("APP_PORT").flag("port")),
///     ("name", Argument::string("api")),
/// ])?;
/// registry.parse_args(["server"])?;
///
/// assert_eq!(registry.get_uint("port")?, Some(9000));
/// assert_eq!(registry.get_string("NAME")?.as_deref(), Some("api"));
/// # Ok::<(), argbind::Error>(())
/// ```
pub struct Registry {
    pub(crate) config: RegistryConfig,
    pub(crate) env: EnvironmentHandler,
    pub(crate) values: HashMap<String, ResolvedValue>,
    pub(crate) flags: FlagSet,
}

impl Registry {
    /// Create a registry reading from the process environment.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry from an explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        let env = EnvironmentHandler::new(config.env_source.clone());
        Self {
            config,
            env,
            values: HashMap::new(),
            flags: FlagSet::default(),
        }
    }

    /// Start a [`RegistryBuilder`].
    pub fn builder(app_name: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder::new(app_name)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of loaded arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("values", &self.values)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
