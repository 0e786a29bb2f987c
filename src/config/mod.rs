//! Core configuration types
//!
//! This module contains the foundational types for argument loading:
//! - `Argument` - Declaration of one configurable value and its sources
//! - `ValueType` - Declared type controlling coercion
//! - `RegistryConfig` - Configuration for the registry
//! - `EnvSource` - Where environment variables are read from

mod schema;
mod types;

pub use schema::{Argument, ValueType};

pub use types::{
    DefaultEnvSource, EnvSource, MemoryEnvSource, RegistryConfig, RegistryConfigBuilder,
};
