//! Command-line interface

mod diagnostics;
mod run;
pub mod style;

pub use diagnostics::{run_check, run_rate_limit};
pub use run::{RunOptions, run_automation};

use pr_automerge::config::AutomationConfig;
use pr_automerge::error::Result;
use pr_automerge::platform::GitHubService;

/// Build the GitHub service from configuration.
///
/// Fails with a configuration error when the token or repository is missing.
pub fn create_service(config: &AutomationConfig) -> Result<GitHubService> {
    let (token, platform_config) = config.platform_config()?;
    GitHubService::new(&token, platform_config)
}
