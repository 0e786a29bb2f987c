//! Common test utilities for argbind integration tests
//!
//! Provides shared fixtures and helper functions.

#![allow(dead_code)]

use argbind::{MemoryEnvSource, Registry};
use std::path::PathBuf;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Registry reading env vars from `vars` only
pub fn registry_with_env(vars: &[(&str, &str)]) -> Registry {
    Registry::builder("test-app")
        .env_source(vars.iter().copied().collect::<MemoryEnvSource>())
        .build()
}

/// Registry with no environment at all
pub fn empty_registry() -> Registry {
    registry_with_env(&[])
}

/// Install a logger once; ignores repeated calls from other tests
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
