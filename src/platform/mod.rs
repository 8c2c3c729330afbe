//! Platform services for the hosting platform
//!
//! Provides the interface the criteria checks and the automation manager
//! use to read pull requests and issue the merge mutation.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    AuthenticatedUser, CombinedStatus, CommitRef, MergeResult, PlatformConfig, PullRequestDetails,
    RateLimitInfo, RepositoryInfo, Review,
};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Platform service trait for pull request operations
///
/// Every call returns a `Result`; callers decide whether a failure is fatal.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;

    /// Resolve the identity behind the configured token
    async fn current_user(&self) -> Result<AuthenticatedUser>;

    /// Fetch the target repository
    async fn get_repository(&self) -> Result<RepositoryInfo>;

    /// Permission level (`admin`, `write`, `read`, ...) of `login` on the repository
    async fn collaborator_permission(&self, login: &str) -> Result<String>;

    /// Core and search API quotas
    async fn rate_limit(&self) -> Result<RateLimitInfo>;

    /// Get the fields of a PR needed to evaluate it
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// List all reviews on a PR, oldest first
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>>;

    /// List the commits of a PR, oldest first
    async fn list_commits(&self, pr_number: u64) -> Result<Vec<CommitRef>>;

    /// Combined CI status of a commit
    async fn combined_status(&self, sha: &str) -> Result<CombinedStatus>;

    /// Merge a PR with a merge commit carrying `commit_message`
    async fn merge_pr(&self, pr_number: u64, commit_message: &str) -> Result<MergeResult>;

    /// Verify the token and repository access.
    ///
    /// Never fails: problems are logged and reported as `false`. The
    /// collaborator permission lookup is diagnostic only and does not affect
    /// the outcome.
    async fn test_connection(&self) -> bool {
        let repo_name = self.config().full_name();

        let user = match self.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "failed to authenticate");
                return false;
            }
        };
        debug!(login = %user.login, "authenticated");

        let repo = match self.get_repository().await {
            Ok(repo) => repo,
            Err(e) => {
                warn!(repo = %repo_name, error = %e, "repository not reachable");
                return false;
            }
        };
        debug!(repo = %repo.full_name, default_branch = ?repo.default_branch, "repository reachable");

        match self.collaborator_permission(&user.login).await {
            Ok(permission) => debug!(login = %user.login, %permission, "collaborator permission"),
            Err(e) => debug!(login = %user.login, error = %e, "could not resolve collaborator permission"),
        }

        true
    }
}
