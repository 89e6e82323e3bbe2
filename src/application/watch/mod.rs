//! Watch Use Case
//!
//! Re-runs individual transform tasks when their inputs change:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (200ms default)
//! - Content hashing so saves that do not change bytes are ignored
//! - Optional rewrite after `html` or `dependencies` re-runs
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(WatchOptions::new(plan));
//! use_case.start(running, |event| { ... });
//! ```

mod event;
mod registry;
mod use_case;

#[cfg(test)]
mod tests;

pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use registry::{ContentTracker, WatchRegistry};
pub use use_case::WatchUseCase;
