//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use pr_automerge::error::{Error, Result};
use pr_automerge::platform::PlatformService;
use pr_automerge::types::{
    AuthenticatedUser, CombinedStatus, CommitRef, MergeResult, PlatformConfig, PullRequestDetails,
    RateLimitInfo, RateQuota, RepositoryInfo, Review, StatusCheck,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub commit_message: String,
}

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// because mockall has issues with methods returning references.
///
/// Features:
/// - Configurable responses per PR number / commit SHA
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    // Responses
    pr_details_responses: Mutex<HashMap<u64, PullRequestDetails>>,
    reviews_responses: Mutex<HashMap<u64, Vec<Review>>>,
    commits_responses: Mutex<HashMap<u64, Vec<CommitRef>>>,
    status_responses: Mutex<HashMap<String, CombinedStatus>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    get_pr_details_calls: Mutex<Vec<u64>>,
    list_reviews_calls: Mutex<Vec<u64>>,
    list_commits_calls: Mutex<Vec<u64>>,
    combined_status_calls: Mutex<Vec<String>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    missing_prs: Mutex<HashSet<u64>>,
    error_on_auth: Mutex<Option<String>>,
    error_on_repository: Mutex<Option<String>>,
    error_on_permission: Mutex<Option<String>>,
    error_on_rate_limit: Mutex<Option<String>>,
    error_on_reviews: Mutex<Option<String>>,
    error_on_commits: Mutex<Option<String>>,
    error_on_status: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            pr_details_responses: Mutex::new(HashMap::new()),
            reviews_responses: Mutex::new(HashMap::new()),
            commits_responses: Mutex::new(HashMap::new()),
            status_responses: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            get_pr_details_calls: Mutex::new(Vec::new()),
            list_reviews_calls: Mutex::new(Vec::new()),
            list_commits_calls: Mutex::new(Vec::new()),
            combined_status_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            missing_prs: Mutex::new(HashSet::new()),
            error_on_auth: Mutex::new(None),
            error_on_repository: Mutex::new(None),
            error_on_permission: Mutex::new(None),
            error_on_rate_limit: Mutex::new(None),
            error_on_reviews: Mutex::new(None),
            error_on_commits: Mutex::new(None),
            error_on_status: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `get_pr_details` fail with "Not Found" for this PR
    pub fn fail_pr_fetch(&self, pr_number: u64) {
        self.missing_prs.lock().unwrap().insert(pr_number);
    }

    /// Make `current_user` return an error
    pub fn fail_auth(&self, msg: &str) {
        *self.error_on_auth.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_repository` return an error
    pub fn fail_repository(&self, msg: &str) {
        *self.error_on_repository.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `collaborator_permission` return an error
    pub fn fail_permission(&self, msg: &str) {
        *self.error_on_permission.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `rate_limit` return an error
    pub fn fail_rate_limit(&self, msg: &str) {
        *self.error_on_rate_limit.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_reviews` return an error
    pub fn fail_reviews(&self, msg: &str) {
        *self.error_on_reviews.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_commits` return an error
    pub fn fail_commits(&self, msg: &str) {
        *self.error_on_commits.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `combined_status` return an error
    pub fn fail_status(&self, msg: &str) {
        *self.error_on_status.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Response setup ===

    /// Set the response for `get_pr_details` for a specific PR
    pub fn set_pr_details_response(&self, details: PullRequestDetails) {
        self.pr_details_responses
            .lock()
            .unwrap()
            .insert(details.number, details);
    }

    /// Set the response for `list_reviews` for a specific PR
    pub fn set_reviews_response(&self, pr_number: u64, reviews: Vec<Review>) {
        self.reviews_responses
            .lock()
            .unwrap()
            .insert(pr_number, reviews);
    }

    /// Set the response for `list_commits` for a specific PR
    pub fn set_commits_response(&self, pr_number: u64, shas: &[&str]) {
        let commits = shas
            .iter()
            .map(|sha| CommitRef {
                sha: (*sha).to_string(),
            })
            .collect();
        self.commits_responses
            .lock()
            .unwrap()
            .insert(pr_number, commits);
    }

    /// Set the response for `combined_status` for a specific commit
    pub fn set_status_response(&self, sha: &str, state: &str, statuses: &[(&str, &str)]) {
        self.status_responses.lock().unwrap().insert(
            sha.to_string(),
            CombinedStatus {
                state: state.to_string(),
                statuses: statuses
                    .iter()
                    .map(|(context, state)| StatusCheck {
                        context: (*context).to_string(),
                        state: (*state).to_string(),
                    })
                    .collect(),
            },
        );
    }

    /// Set the response for `merge_pr` for a specific PR
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    /// Helper to set up a PR that meets every criterion: clean, two approvals,
    /// one commit with green CI
    pub fn setup_mergeable_pr(&self, pr_number: u64, title: &str) {
        let sha = format!("sha_{pr_number}");
        self.set_pr_details_response(super::make_pr(pr_number, title));
        self.set_reviews_response(
            pr_number,
            vec![
                super::review("alice", pr_automerge::ReviewState::Approved),
                super::review("bob", pr_automerge::ReviewState::Approved),
            ],
        );
        self.set_commits_response(pr_number, &[&sha]);
        self.set_status_response(&sha, "success", &[("ci/build", "success")]);
    }

    // === Call tracking accessors ===

    pub fn get_pr_details_calls(&self) -> Vec<u64> {
        self.get_pr_details_calls.lock().unwrap().clone()
    }

    pub fn get_list_reviews_calls(&self) -> Vec<u64> {
        self.list_reviews_calls.lock().unwrap().clone()
    }

    pub fn get_list_commits_calls(&self) -> Vec<u64> {
        self.list_commits_calls.lock().unwrap().clone()
    }

    pub fn get_combined_status_calls(&self) -> Vec<String> {
        self.combined_status_calls.lock().unwrap().clone()
    }

    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    pub fn assert_merge_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr to be called for PR #{pr_number}, calls: {calls:?}"
        );
    }

    pub fn assert_merge_not_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            !calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr NOT to be called for PR #{pr_number}, calls: {calls:?}"
        );
    }

    pub fn merge_call_count(&self) -> usize {
        self.merge_pr_calls.lock().unwrap().len()
    }
}

fn injected(slot: &Mutex<Option<String>>) -> Result<()> {
    match slot.lock().unwrap().as_ref() {
        Some(msg) => Err(Error::GitHubApi(msg.clone())),
        None => Ok(()),
    }
}

fn quota(remaining: u64, limit: u64) -> RateQuota {
    RateQuota {
        remaining,
        limit,
        reset: Utc::now(),
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    async fn current_user(&self) -> Result<AuthenticatedUser> {
        injected(&self.error_on_auth)?;
        Ok(AuthenticatedUser {
            login: "automerge-bot".to_string(),
        })
    }

    async fn get_repository(&self) -> Result<RepositoryInfo> {
        injected(&self.error_on_repository)?;
        Ok(RepositoryInfo {
            full_name: self.config.full_name(),
            default_branch: Some("main".to_string()),
        })
    }

    async fn collaborator_permission(&self, _login: &str) -> Result<String> {
        injected(&self.error_on_permission)?;
        Ok("write".to_string())
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo> {
        injected(&self.error_on_rate_limit)?;
        Ok(RateLimitInfo {
            core: quota(4999, 5000),
            search: quota(29, 30),
        })
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.get_pr_details_calls.lock().unwrap().push(pr_number);

        if self.missing_prs.lock().unwrap().contains(&pr_number) {
            return Err(Error::GitHubApi(format!("PR #{pr_number}: Not Found")));
        }

        self.pr_details_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number}: Not Found")))
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        self.list_reviews_calls.lock().unwrap().push(pr_number);
        injected(&self.error_on_reviews)?;

        Ok(self
            .reviews_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_commits(&self, pr_number: u64) -> Result<Vec<CommitRef>> {
        self.list_commits_calls.lock().unwrap().push(pr_number);
        injected(&self.error_on_commits)?;

        Ok(self
            .commits_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn combined_status(&self, sha: &str) -> Result<CombinedStatus> {
        self.combined_status_calls
            .lock()
            .unwrap()
            .push(sha.to_string());
        injected(&self.error_on_status)?;

        // No statuses configured: GitHub reports "pending" with an empty list
        Ok(self
            .status_responses
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_else(|| CombinedStatus {
                state: "pending".to_string(),
                statuses: vec![],
            }))
    }

    async fn merge_pr(&self, pr_number: u64, commit_message: &str) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            pr_number,
            commit_message: commit_message.to_string(),
        });

        injected(&self.error_on_merge_pr)?;

        Ok(self
            .merge_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or(MergeResult {
                merged: true,
                sha: Some(format!("merged_sha_{pr_number}")),
                message: Some("Pull Request successfully merged".to_string()),
            }))
    }
}
