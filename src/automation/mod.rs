//! Automation engine
//!
//! One sequential pass over a range of PRs:
//! 1. Fetch - load every PR in the range, dropping ones that can't be fetched
//! 2. Evaluate - run the criteria checks
//! 3. Act - merge, or report why the PR was skipped
//! 4. Summarize - notify and return the counts

mod manager;
mod run;
mod summary;

pub use manager::{AutomationManager, merge_commit_message};
pub use run::{RunOutcome, run_with_service};
pub use summary::{MergeAction, PrOutcome, RunSummary};
