//! Build Use Case
//!
//! Orchestrates `clean → parallel transform tasks → rewrite`.
//!
//! Tasks run on tokio's blocking pool inside a `JoinSet`. Every task is
//! awaited before the orchestrator decides; if any failed, the rewrite step
//! is skipped and the first failure (in task order) is returned.

mod event;
mod options;
mod result;
mod use_case;

#[cfg(test)]
mod tests;

pub use event::BuildEvent;
pub use options::BuildOptions;
pub use result::{BuildReport, TaskFailure};
pub use use_case::BuildUseCase;
