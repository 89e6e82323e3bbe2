//! Domain Services
//!
//! Stateless text transforms used by the transform tasks and the rewrite
//! step. None of them touch the file system.

mod html_minifier;
mod rewriter;
mod script_minifier;

pub use html_minifier::collapse_whitespace;
pub use rewriter::{AppliedRule, RewriteOutcome, RewriteRule, Rewriter};
pub use script_minifier::minify_script;
