//! Error types for pr-automerge

use thiserror::Error;

/// Errors that can occur while automating pull request merges
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration (fatal, raised before any API call)
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API returned something we could not use
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Error surfaced by octocrab
    #[error("GitHub API error: {}", octocrab_message(.0))]
    Octocrab(#[from] octocrab::Error),

    /// Raw HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A notification could not be delivered
    #[error("notification error: {0}")]
    Notification(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Pull the human-readable message out of an octocrab error.
///
/// The `Display` impl of `octocrab::Error::GitHub` only says "GitHub", which
/// hides the status and the reason the API gave us.
fn octocrab_message(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            format!("HTTP {}: {}", source.status_code.as_u16(), source.message)
        }
        other => other.to_string(),
    }
}
