//! Core types for pr-automerge
//!
//! These are platform-neutral views of the data the criteria checks consume.
//! The GitHub service maps API responses into them; tests build them by hand.

use chrono::{DateTime, Utc};

/// Repository coordinates on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// `owner/name` form of the repository
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// PR state (open, closed)
///
/// Whether a closed PR was merged is tracked separately in
/// [`PullRequestDetails::merged`], matching how GitHub reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrState {
    /// PR is open
    Open,
    /// PR is closed (merged or not)
    Closed,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Platform-computed mergeability of a PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeableState {
    /// No conflicts and all requirements met
    Clean,
    /// Merge conflicts
    Dirty,
    /// Mergeable, but some non-required checks are failing
    Unstable,
    /// Blocked by branch protection
    Blocked,
    /// Head branch is behind base
    Behind,
    /// PR is a draft
    Draft,
    /// Mergeable with passing commit status and pre-receive hooks
    HasHooks,
    /// GitHub has not computed the state yet
    Unknown,
    /// Any value we do not model explicitly
    Other(String),
}

impl MergeableState {
    /// Wire name of the state as GitHub spells it
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::Unstable => "unstable",
            Self::Blocked => "blocked",
            Self::Behind => "behind",
            Self::Draft => "draft",
            Self::HasHooks => "has_hooks",
            Self::Unknown => "unknown",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for MergeableState {
    fn from(value: &str) -> Self {
        match value {
            "clean" => Self::Clean,
            "dirty" => Self::Dirty,
            "unstable" => Self::Unstable,
            "blocked" => Self::Blocked,
            "behind" => Self::Behind,
            "draft" => Self::Draft,
            "has_hooks" => Self::HasHooks,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for MergeableState {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl std::fmt::Display for MergeableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pull request fields needed to evaluate merge readiness
#[derive(Debug, Clone)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Current state of the PR
    pub state: PrState,
    /// Whether the PR has been merged
    pub merged: bool,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Mergeable state as computed by the platform
    pub mergeable_state: MergeableState,
    /// Names of the labels attached to the PR
    pub labels: Vec<String>,
}

/// Review verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// Reviewer approved the change
    Approved,
    /// Reviewer requested changes
    ChangesRequested,
    /// Reviewer only left comments
    Commented,
    /// Review was dismissed
    Dismissed,
    /// Review has not been submitted yet
    Pending,
    /// State missing from the response or not modelled here
    Unknown,
}

/// A single review on a PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Login of the reviewer
    pub author: String,
    /// Review verdict
    pub state: ReviewState,
}

impl Review {
    /// Convenience constructor
    pub fn new(author: impl Into<String>, state: ReviewState) -> Self {
        Self {
            author: author.into(),
            state,
        }
    }
}

/// A commit on a PR (chronological order as returned by the platform)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    /// Commit SHA
    pub sha: String,
}

/// One status context reported against a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCheck {
    /// Status context name (e.g., "ci/build")
    pub context: String,
    /// State: "success", "pending", "failure" or "error"
    pub state: String,
}

/// Combined CI status for a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedStatus {
    /// Aggregate state across all contexts
    pub state: String,
    /// Individual status contexts
    pub statuses: Vec<StatusCheck>,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User login
    pub login: String,
}

/// Basic repository information used by the connection check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// `owner/name`
    pub full_name: String,
    /// Default branch, if reported
    pub default_branch: Option<String>,
}

/// A single API quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuota {
    /// Requests left in the current window
    pub remaining: u64,
    /// Requests allowed per window
    pub limit: u64,
    /// When the window resets
    pub reset: DateTime<Utc>,
}

/// Rate limit status for the quotas we care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Core REST API quota
    pub core: RateQuota,
    /// Search API quota
    pub search: RateQuota,
}
