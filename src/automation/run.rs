//! A complete pass: connection check, then the configured PR range

use crate::automation::manager::AutomationManager;
use crate::automation::summary::RunSummary;
use crate::config::AutomationConfig;
use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::platform::PlatformService;
use serde::Serialize;
use tracing::warn;

/// How a pass ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The connection check failed; no PR was fetched
    ConnectionFailed,
    /// The range was processed
    Completed(RunSummary),
}

impl RunOutcome {
    /// Connected and finished without errors
    pub const fn is_success(&self) -> bool {
        match self {
            Self::ConnectionFailed => false,
            Self::Completed(summary) => summary.is_success(),
        }
    }

    /// Process exit status: 0 on success, 1 otherwise
    pub const fn exit_status(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    /// The run summary, if the range was processed
    pub const fn summary(&self) -> Option<&RunSummary> {
        match self {
            Self::ConnectionFailed => None,
            Self::Completed(summary) => Some(summary),
        }
    }

    /// Pretty-printed JSON report
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Internal(format!("Failed to serialize summary: {e}")))
    }
}

/// Verify the connection, then process `config`'s PR range.
///
/// Nothing is fetched when the connection check fails.
pub async fn run_with_service(
    platform: &dyn PlatformService,
    config: &AutomationConfig,
    notifier: Notifier,
) -> RunOutcome {
    if !platform.test_connection().await {
        warn!(repo = %platform.config().full_name(), "connection check failed");
        return RunOutcome::ConnectionFailed;
    }

    let manager = AutomationManager::new(platform, config, notifier);
    RunOutcome::Completed(
        manager
            .process_pr_range(config.range_start, config.range_end)
            .await,
    )
}
