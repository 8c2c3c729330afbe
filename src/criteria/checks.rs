//! The four merge-readiness checks

use crate::criteria::result::{ApprovalCheck, LabelCheck, MergeableCheck, StatusCheckResult};
use crate::platform::PlatformService;
use crate::types::{MergeableState, PrState, PullRequestDetails, Review, ReviewState};
use tracing::{debug, warn};

/// Collapse a chronological review list to the latest review per author.
///
/// Later reviews overwrite earlier ones from the same author. Authors keep
/// the position of their first review.
pub fn collapse_latest_reviews(reviews: &[Review]) -> Vec<(&str, ReviewState)> {
    let mut latest: Vec<(&str, ReviewState)> = Vec::new();

    for review in reviews {
        match latest.iter_mut().find(|(author, _)| *author == review.author.as_str()) {
            Some(entry) => entry.1 = review.state,
            None => latest.push((review.author.as_str(), review.state)),
        }
    }

    latest
}

/// Check whether enough distinct reviewers currently approve the PR.
///
/// A review fetch failure yields a failing result with no approvers.
pub async fn check_approvals(
    platform: &dyn PlatformService,
    pr: &PullRequestDetails,
    min_reviews: usize,
) -> ApprovalCheck {
    let reviews = match platform.list_reviews(pr.number).await {
        Ok(reviews) => reviews,
        Err(e) => {
            warn!(pr_number = pr.number, error = %e, "error checking PR approvals");
            return ApprovalCheck::default();
        }
    };

    let approvers: Vec<String> = collapse_latest_reviews(&reviews)
        .into_iter()
        .filter(|(_, state)| *state == ReviewState::Approved)
        .map(|(author, _)| author.to_string())
        .collect();

    debug!(pr_number = pr.number, approvers = approvers.len(), min_reviews, "checked approvals");
    ApprovalCheck {
        has_approvals: approvers.len() >= min_reviews,
        approvers,
    }
}

/// Check that every required label is on the PR
pub fn check_required_labels(pr: &PullRequestDetails, required_labels: &[String]) -> LabelCheck {
    let missing: Vec<String> = required_labels
        .iter()
        .filter(|label| !pr.labels.contains(label))
        .cloned()
        .collect();

    LabelCheck {
        has_labels: missing.is_empty(),
        missing,
    }
}

/// Check the combined CI status of the PR's latest commit.
///
/// Passes only when the aggregate state is `success` and no individual
/// context reports anything else.
pub async fn check_status_checks(
    platform: &dyn PlatformService,
    pr: &PullRequestDetails,
) -> StatusCheckResult {
    let commits = match platform.list_commits(pr.number).await {
        Ok(commits) => commits,
        Err(e) => return status_error(pr.number, &e),
    };

    let Some(latest) = commits.last() else {
        return StatusCheckResult {
            passing: false,
            failing: vec!["No commits found".to_string()],
        };
    };

    let combined = match platform.combined_status(&latest.sha).await {
        Ok(combined) => combined,
        Err(e) => return status_error(pr.number, &e),
    };

    let failing: Vec<String> = combined
        .statuses
        .iter()
        .filter(|s| s.state != "success")
        .map(|s| format!("{}: {}", s.context, s.state))
        .collect();

    let overall_passing = combined.state == "success";
    if overall_passing != failing.is_empty() {
        warn!(
            pr_number = pr.number,
            state = %combined.state,
            failing = failing.len(),
            "combined status disagrees with individual contexts"
        );
    }

    StatusCheckResult {
        passing: overall_passing && failing.is_empty(),
        failing,
    }
}

fn status_error(pr_number: u64, err: &crate::error::Error) -> StatusCheckResult {
    warn!(pr_number, error = %err, "error checking status checks");
    StatusCheckResult {
        passing: false,
        failing: vec![format!("Error checking status: {err}")],
    }
}

/// Check PR state, draft flag and mergeable state.
///
/// Every problem is reported, not just the first.
pub fn is_pr_mergeable(pr: &PullRequestDetails) -> MergeableCheck {
    let mut issues = Vec::new();

    if pr.state != PrState::Open {
        issues.push(format!("PR is {}, not open", pr.state));
    }
    if pr.merged {
        issues.push("PR is already merged".to_string());
    }
    if pr.is_draft {
        issues.push("PR is a draft".to_string());
    }
    match pr.mergeable_state {
        MergeableState::Clean => {}
        MergeableState::Unstable => issues.push(
            "PR mergeable state is unstable and requires manual intervention".to_string(),
        ),
        ref other => issues.push(format!("PR mergeable state is {other}")),
    }

    MergeableCheck {
        mergeable: issues.is_empty(),
        issues,
    }
}
