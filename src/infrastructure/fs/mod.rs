//! File System Implementations
//!
//! Concrete implementation of the FileSystem port and source resolution.

mod local;
mod sources;

pub use local::LocalFs;
pub use sources::{resolve_sources, SourceFile};
