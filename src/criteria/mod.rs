//! Merge-readiness criteria
//!
//! Four independent checks, each producing its own result struct:
//! 1. Mergeable - PR state, draft flag and platform mergeable state (pure)
//! 2. Approvals - latest review per author (fetches reviews)
//! 3. Labels - required labels present (pure)
//! 4. Status checks - combined CI status of the latest commit (fetches commits + status)
//!
//! Checks never return errors: a failed API call becomes a failing result
//! with a message describing what went wrong.

mod checks;
mod result;

pub use checks::{
    check_approvals, check_required_labels, check_status_checks, collapse_latest_reviews,
    is_pr_mergeable,
};
pub use result::{
    ApprovalCheck, CriteriaResult, LabelCheck, MergeableCheck, StatusCheckResult,
};
