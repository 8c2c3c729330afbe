//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    AuthenticatedUser, CombinedStatus, CommitRef, MergeResult, MergeableState, PlatformConfig,
    PrState, PullRequestDetails, RateLimitInfo, RateQuota, RepositoryInfo, Review, ReviewState,
    StatusCheck,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::{Octocrab, Page};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Raw REST response types for endpoints where octocrab's models hide
// fields we need as plain strings (mergeable_state, status contexts)

#[derive(Deserialize)]
struct RawPullRequest {
    number: u64,
    title: Option<String>,
    state: String,
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    draft: bool,
    mergeable_state: Option<String>,
    #[serde(default)]
    labels: Vec<RawLabel>,
}

#[derive(Deserialize)]
struct RawLabel {
    name: String,
}

#[derive(Deserialize)]
struct RawCommit {
    sha: String,
}

#[derive(Deserialize)]
struct RawCombinedStatus {
    state: String,
    #[serde(default)]
    statuses: Vec<RawStatus>,
}

#[derive(Deserialize)]
struct RawStatus {
    context: String,
    state: String,
}

#[derive(Deserialize)]
struct CollaboratorPermission {
    permission: String,
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
}

const PER_PAGE: PageParams = PageParams { per_page: 100 };

impl From<RawPullRequest> for PullRequestDetails {
    fn from(pr: RawPullRequest) -> Self {
        let state = if pr.state == "open" {
            PrState::Open
        } else {
            PrState::Closed
        };

        Self {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            state,
            merged: pr.merged,
            is_draft: pr.draft,
            // GitHub omits the field while it is still computing
            mergeable_state: pr
                .mergeable_state
                .map_or(MergeableState::Unknown, MergeableState::from),
            labels: pr.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (combined status)
    token: String,
    /// HTTP client for raw requests (combined status)
    http_client: Client,
    /// API host for raw requests
    api_host: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_host = if let Some(ref h) = config.host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
            format!("{h}/api/v3")
        } else {
            "api.github.com".to_string()
        };

        let client = builder.build()?;

        let http_client = Client::builder()
            .user_agent(concat!("pr-automerge/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_host,
        })
    }

    fn repo_route(&self, rest: &str) -> String {
        format!("/repos/{}/{}{rest}", self.config.owner, self.config.repo)
    }
}

fn quota_from_octocrab(rate: &octocrab::models::Rate) -> RateQuota {
    let reset = i64::try_from(rate.reset)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    RateQuota {
        remaining: rate.remaining as u64,
        limit: rate.limit as u64,
        reset,
    }
}

/// Map an octocrab review state; a missing or unmodelled state still counts
/// as the author's latest review, just not as an approval.
fn review_state_from_octocrab(state: Option<octocrab::models::pulls::ReviewState>) -> ReviewState {
    use octocrab::models::pulls::ReviewState as Octo;

    match state {
        Some(Octo::Approved) => ReviewState::Approved,
        Some(Octo::ChangesRequested) => ReviewState::ChangesRequested,
        Some(Octo::Commented) => ReviewState::Commented,
        Some(Octo::Dismissed) => ReviewState::Dismissed,
        Some(Octo::Pending) => ReviewState::Pending,
        #[allow(unreachable_patterns)]
        _ => ReviewState::Unknown,
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    async fn current_user(&self) -> Result<AuthenticatedUser> {
        let user = self.client.current().user().await?;
        Ok(AuthenticatedUser { login: user.login })
    }

    async fn get_repository(&self) -> Result<RepositoryInfo> {
        let repo = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .get()
            .await?;

        Ok(RepositoryInfo {
            full_name: repo.full_name.unwrap_or_else(|| self.config.full_name()),
            default_branch: repo.default_branch,
        })
    }

    async fn collaborator_permission(&self, login: &str) -> Result<String> {
        let route = self.repo_route(&format!("/collaborators/{login}/permission"));
        let response: CollaboratorPermission = self.client.get(route, None::<&()>).await?;
        Ok(response.permission)
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo> {
        let limits = self.client.ratelimit().get().await?;
        Ok(RateLimitInfo {
            core: quota_from_octocrab(&limits.resources.core),
            search: quota_from_octocrab(&limits.resources.search),
        })
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");

        let route = self.repo_route(&format!("/pulls/{pr_number}"));
        let pr: RawPullRequest = self.client.get(route, None::<&()>).await?;
        let details = PullRequestDetails::from(pr);

        debug!(
            pr_number,
            state = %details.state,
            mergeable_state = %details.mergeable_state,
            "got PR details"
        );
        Ok(details)
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        debug!(pr_number, "listing reviews");

        let first_page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list_reviews(pr_number)
            .send()
            .await?;
        let reviews = self.client.all_pages(first_page).await?;

        // Reviews from deleted accounts have no user; they can't count as approvals
        let result: Vec<Review> = reviews
            .into_iter()
            .filter_map(|r| {
                let author = r.user?.login;
                Some(Review {
                    author,
                    state: review_state_from_octocrab(r.state),
                })
            })
            .collect();

        debug!(pr_number, count = result.len(), "listed reviews");
        Ok(result)
    }

    async fn list_commits(&self, pr_number: u64) -> Result<Vec<CommitRef>> {
        debug!(pr_number, "listing commits");

        let route = self.repo_route(&format!("/pulls/{pr_number}/commits"));
        let first_page: Page<RawCommit> = self.client.get(route, Some(&PER_PAGE)).await?;
        let commits = self.client.all_pages(first_page).await?;

        debug!(pr_number, count = commits.len(), "listed commits");
        Ok(commits
            .into_iter()
            .map(|c| CommitRef { sha: c.sha })
            .collect())
    }

    async fn combined_status(&self, sha: &str) -> Result<CombinedStatus> {
        let url = format!(
            "https://{}/repos/{}/{}/commits/{}/status",
            self.api_host, self.config.owner, self.config.repo, sha
        );

        let response = self
            .http_client
            .get(&url)
            .query(&PER_PAGE)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch commit status: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Commit status request for {sha} returned {}",
                response.status()
            )));
        }

        let status: RawCombinedStatus = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse commit status: {e}")))?;

        debug!(sha, state = %status.state, count = status.statuses.len(), "combined status");
        Ok(CombinedStatus {
            state: status.state,
            statuses: status
                .statuses
                .into_iter()
                .map(|s| StatusCheck {
                    context: s.context,
                    state: s.state,
                })
                .collect(),
        })
    }

    async fn merge_pr(&self, pr_number: u64, commit_message: &str) -> Result<MergeResult> {
        debug!(pr_number, "merging PR");

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab::params::pulls::MergeMethod::Merge)
            .message(commit_message)
            .send()
            .await?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
