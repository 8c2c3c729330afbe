//! Run summary - what happened to each PR in one pass

use crate::criteria::CriteriaResult;
use serde::Serialize;

/// What the manager did with a PR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeAction {
    /// Merged (or simulated in dry-run mode)
    Merged,
    /// Met the criteria but the merge did not happen
    MergeFailed,
    /// Did not meet the criteria
    Skipped,
}

impl std::fmt::Display for MergeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged => write!(f, "merged"),
            Self::MergeFailed => write!(f, "merge_failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Criteria results for one PR plus the action taken
#[derive(Debug, Clone, Serialize)]
pub struct PrOutcome {
    /// Criteria evaluation
    #[serde(flatten)]
    pub criteria: CriteriaResult,
    /// Action taken
    pub action: MergeAction,
}

/// Aggregate outcome of one automation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// PRs successfully fetched in the requested range
    pub total_prs: usize,
    /// PRs the manager started processing
    pub processed: usize,
    /// PRs merged
    pub merged: usize,
    /// PRs that did not meet the criteria
    pub skipped: usize,
    /// Merge failures and unexpected per-PR errors
    pub errors: usize,
    /// Per-PR records in processing order
    pub details: Vec<PrOutcome>,
}

impl RunSummary {
    /// Whether the run finished without errors
    pub const fn is_success(&self) -> bool {
        self.errors == 0
    }

    /// Record the outcome of one PR, bumping the matching counter
    pub fn record(&mut self, outcome: PrOutcome) {
        match outcome.action {
            MergeAction::Merged => self.merged += 1,
            MergeAction::MergeFailed => self.errors += 1,
            MergeAction::Skipped => self.skipped += 1,
        }
        self.details.push(outcome);
    }

    /// One-line count summary
    pub fn counts_line(&self) -> String {
        format!(
            "{} merged, {} skipped, {} errors",
            self.merged, self.skipped, self.errors
        )
    }
}
