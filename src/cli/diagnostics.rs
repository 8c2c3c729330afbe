//! Connection check and rate limit commands

use crate::cli::create_service;
use crate::cli::style::{Stylize, check};
use anstream::println;
use chrono::Utc;
use pr_automerge::config::AutomationConfig;
use pr_automerge::error::Result;
use pr_automerge::platform::PlatformService;
use pr_automerge::types::RateQuota;
use std::process::ExitCode;

/// Verify the token and repository access
pub async fn run_check(config: &AutomationConfig) -> Result<ExitCode> {
    let service = create_service(config)?;
    let repo = service.config().full_name();

    if service.test_connection().await {
        println!("{} Connected to {}", check(), repo.accent());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} Failed to connect to {}", "❌".error(), repo.accent());
        Ok(ExitCode::FAILURE)
    }
}

/// Print the core and search API quotas
pub async fn run_rate_limit(config: &AutomationConfig) -> Result<ExitCode> {
    let service = create_service(config)?;
    let info = service.rate_limit().await?;

    println!("{}:", "GitHub API rate limits".emphasis());
    print_quota("core", &info.core);
    print_quota("search", &info.search);
    Ok(ExitCode::SUCCESS)
}

fn print_quota(name: &str, quota: &RateQuota) {
    let resets_in = (quota.reset - Utc::now()).num_minutes().max(0);
    let remaining = format!("{}/{}", quota.remaining, quota.limit);
    let remaining = if quota.remaining == 0 {
        remaining.error()
    } else {
        remaining.accent()
    };
    println!(
        "  {name:<7} {remaining} remaining, {}",
        format!(
            "resets in {resets_in} min ({})",
            quota.reset.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .muted()
    );
}
