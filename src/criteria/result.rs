//! Result records for the criteria checks

use serde::Serialize;

/// Outcome of the mergeable-state check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeableCheck {
    /// Whether the PR is in a mergeable state
    pub mergeable: bool,
    /// Human-readable problems, empty when mergeable
    pub issues: Vec<String>,
}

/// Outcome of the approval check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApprovalCheck {
    /// Whether enough distinct reviewers approved
    pub has_approvals: bool,
    /// Logins whose latest review is an approval, in order of first review
    pub approvers: Vec<String>,
}

/// Outcome of the required-labels check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelCheck {
    /// Whether every required label is present
    pub has_labels: bool,
    /// Required labels not on the PR, in configured order
    pub missing: Vec<String>,
}

impl LabelCheck {
    /// Result used when no labels are required
    pub const fn not_required() -> Self {
        Self {
            has_labels: true,
            missing: Vec::new(),
        }
    }
}

/// Outcome of the CI status check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCheckResult {
    /// Whether CI is green on the latest commit
    pub passing: bool,
    /// `"{context}: {state}"` for every non-successful context, or an error message
    pub failing: Vec<String>,
}

impl StatusCheckResult {
    /// Result used when status checks are not required
    pub const fn not_required() -> Self {
        Self {
            passing: true,
            failing: Vec::new(),
        }
    }
}

/// All criteria for one PR
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaResult {
    /// PR number
    pub pr_number: u64,
    /// PR title
    pub title: String,
    /// Mergeable-state check
    pub mergeable: MergeableCheck,
    /// Approval check
    pub approvals: ApprovalCheck,
    /// Required-labels check
    pub labels: LabelCheck,
    /// CI status check
    pub status_checks: StatusCheckResult,
}

impl CriteriaResult {
    /// Whether every criterion holds
    pub const fn meets_criteria(&self) -> bool {
        self.mergeable.mergeable
            && self.approvals.has_approvals
            && self.labels.has_labels
            && self.status_checks.passing
    }

    /// Reasons the PR was not merged, in check order.
    ///
    /// Empty when [`meets_criteria`](Self::meets_criteria) holds.
    pub fn skip_reasons(&self, min_reviews: usize) -> Vec<String> {
        let mut reasons = Vec::new();

        if !self.mergeable.mergeable {
            reasons.extend(self.mergeable.issues.iter().cloned());
        }
        if !self.approvals.has_approvals {
            let needed = min_reviews.saturating_sub(self.approvals.approvers.len());
            reasons.push(format!("Needs {needed} more approval(s)"));
        }
        if !self.labels.has_labels {
            reasons.push(format!("Missing labels: {}", self.labels.missing.join(", ")));
        }
        if !self.status_checks.passing {
            reasons.extend(self.status_checks.failing.iter().cloned());
        }

        reasons
    }
}
