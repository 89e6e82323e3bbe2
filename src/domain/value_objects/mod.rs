//! Domain Value Objects
//!
//! Immutable value types that represent build concepts.

mod config_warning;
mod hash;
mod layout;
mod source_pattern;
mod task_kind;

pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use layout::Layout;
pub use source_pattern::{describe_patterns, SourcePattern};
pub use task_kind::TaskKind;
