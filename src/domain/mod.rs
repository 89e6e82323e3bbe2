//! Domain Layer
//!
//! Pure build logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - The dependency manifest
//! - `value_objects/` - Immutable value types (Layout, SourcePattern, TaskKind)
//! - `services/` - Text transforms (minifiers, path rewriter)
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
