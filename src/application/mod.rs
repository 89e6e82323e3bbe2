//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain text transforms (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - clean, parallel transform tasks, rewrite
//! - `CleanUseCase` - wipe the output directory
//! - `WatchUseCase` - re-run tasks when their inputs change

pub mod build;
pub mod clean;
pub mod plan;
pub mod rewrite;
pub mod tasks;
pub mod watch;

#[cfg(test)]
mod fixture;

pub use build::{BuildEvent, BuildOptions, BuildReport, BuildUseCase, TaskFailure};
pub use clean::{CleanResult, CleanUseCase};
pub use plan::BuildPlan;
pub use rewrite::{rewrite_html, rewriter_for, RewriteReport};
pub use tasks::{run_task, TaskReport};
pub use watch::{WatchEvent, WatchOptions, WatchUseCase, WatcherState};
