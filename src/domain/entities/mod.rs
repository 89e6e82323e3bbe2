//! Domain Entities
//!
//! - `Manifest` - ordered third-party library files to publish

mod manifest;

pub use manifest::{Manifest, ManifestEntry};
