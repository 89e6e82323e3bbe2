//! Terminal output for the assetline binary.
//!
//! Views render library events into lines; `json` writes NDJSON instead.

pub mod blocks;
pub mod context;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
