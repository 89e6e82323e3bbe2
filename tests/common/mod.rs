//! Common test utilities for assetline CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the binary
//! - Fixtures: a sample project that builds with the default configuration

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
