//! The automation manager

use crate::automation::summary::{MergeAction, PrOutcome, RunSummary};
use crate::config::AutomationConfig;
use crate::criteria::{
    CriteriaResult, LabelCheck, StatusCheckResult, check_approvals, check_required_labels,
    check_status_checks, is_pr_mergeable,
};
use crate::error::Result;
use crate::notify::{NotificationLevel, Notifier};
use crate::platform::PlatformService;
use crate::types::PullRequestDetails;
use tracing::{debug, info, warn};

/// Commit message used for auto-merges
pub fn merge_commit_message(pr: &PullRequestDetails) -> String {
    format!("Auto-merge PR #{}: {}", pr.number, pr.title)
}

/// Runs one automation pass against a platform
pub struct AutomationManager<'a> {
    platform: &'a dyn PlatformService,
    config: &'a AutomationConfig,
    notifier: Notifier,
}

impl<'a> AutomationManager<'a> {
    /// Create a manager
    pub fn new(
        platform: &'a dyn PlatformService,
        config: &'a AutomationConfig,
        notifier: Notifier,
    ) -> Self {
        Self {
            platform,
            config,
            notifier,
        }
    }

    /// Fetch every PR numbered `start..=end`.
    ///
    /// PRs that fail to load are logged and left out.
    pub async fn get_prs_in_range(&self, start: u64, end: u64) -> Vec<PullRequestDetails> {
        let mut prs = Vec::new();

        for pr_number in start..=end {
            match self.platform.get_pr_details(pr_number).await {
                Ok(pr) => prs.push(pr),
                Err(e) => warn!(pr_number, error = %e, "could not fetch PR"),
            }
        }

        debug!(start, end, fetched = prs.len(), "fetched PRs in range");
        prs
    }

    /// Evaluate all criteria for one PR.
    ///
    /// The label check is skipped when no labels are required, and the status
    /// check when status checks are not required.
    pub async fn check_pr_criteria(&self, pr: &PullRequestDetails) -> CriteriaResult {
        let mergeable = is_pr_mergeable(pr);
        let approvals = check_approvals(self.platform, pr, self.config.min_reviews).await;

        let labels = if self.config.required_labels.is_empty() {
            LabelCheck::not_required()
        } else {
            check_required_labels(pr, &self.config.required_labels)
        };

        let status_checks = if self.config.require_status_checks {
            check_status_checks(self.platform, pr).await
        } else {
            StatusCheckResult::not_required()
        };

        CriteriaResult {
            pr_number: pr.number,
            title: pr.title.clone(),
            mergeable,
            approvals,
            labels,
            status_checks,
        }
    }

    /// Merge a PR, honouring the auto-merge and dry-run switches.
    ///
    /// Returns `Ok(true)` when the PR was merged (or the merge simulated),
    /// `Ok(false)` when it was not. Platform failures are reported and become
    /// `Ok(false)`; only a failure to deliver a notification is an error.
    pub async fn merge_pr(&self, pr: &PullRequestDetails) -> Result<bool> {
        if !self.config.auto_merge_enabled {
            self.notifier.warning(format!(
                "Auto-merge is disabled. PR #{} would be merged.",
                pr.number
            ))?;
            return Ok(false);
        }

        if self.config.dry_run {
            self.notifier
                .info(format!("DRY RUN: Would merge PR #{} - {}", pr.number, pr.title))?;
            return Ok(true);
        }

        let commit_message = merge_commit_message(pr);
        match self.platform.merge_pr(pr.number, &commit_message).await {
            Ok(result) if result.merged => {
                info!(pr_number = pr.number, sha = ?result.sha, "merged PR");
                self.notifier.success(format!(
                    "Successfully merged PR #{} - {}",
                    pr.number, pr.title
                ))?;
                Ok(true)
            }
            Ok(result) => {
                let reason = result.message.unwrap_or_else(|| "unknown reason".to_string());
                self.notifier
                    .error(format!("Failed to merge PR #{}: {reason}", pr.number))?;
                Ok(false)
            }
            Err(e) => {
                self.notifier
                    .error(format!("Error merging PR #{}: {e}", pr.number))?;
                Ok(false)
            }
        }
    }

    /// Evaluate one PR and act on the result
    pub async fn process_pr(&self, pr: &PullRequestDetails) -> Result<PrOutcome> {
        let criteria = self.check_pr_criteria(pr).await;

        let action = if criteria.meets_criteria() {
            if self.merge_pr(pr).await? {
                MergeAction::Merged
            } else {
                MergeAction::MergeFailed
            }
        } else {
            let reasons = criteria.skip_reasons(self.config.min_reviews);
            self.notifier
                .info(format!("Skipped PR #{}: {}", pr.number, reasons.join(", ")))?;
            MergeAction::Skipped
        };

        debug!(pr_number = pr.number, %action, "processed PR");
        Ok(PrOutcome { criteria, action })
    }

    /// Process every PR numbered `start..=end` and summarize the run.
    ///
    /// A failure on one PR is counted and reported; the loop moves on.
    pub async fn process_pr_range(&self, start: u64, end: u64) -> RunSummary {
        self.notify_run(
            format!("Starting PR automation for range #{start}-#{end}"),
            NotificationLevel::Info,
        );

        let prs = self.get_prs_in_range(start, end).await;
        let mut summary = RunSummary {
            total_prs: prs.len(),
            ..RunSummary::default()
        };

        for pr in &prs {
            summary.processed += 1;

            match self.process_pr(pr).await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    summary.errors += 1;
                    warn!(pr_number = pr.number, error = %e, "error processing PR");
                    self.notify_run(
                        format!("Error processing PR #{}: {e}", pr.number),
                        NotificationLevel::Error,
                    );
                }
            }
        }

        let level = if summary.is_success() {
            NotificationLevel::Success
        } else {
            NotificationLevel::Warning
        };
        self.notify_run(
            format!("Automation complete: {}", summary.counts_line()),
            level,
        );

        summary
    }

    /// Run-level notifications must not abort the run
    fn notify_run(&self, message: String, level: NotificationLevel) {
        if let Err(e) = self.notifier.notify(message, level) {
            warn!(error = %e, "failed to deliver notification");
        }
    }
}
