//! Run command - one automation pass over a PR range

use crate::cli::create_service;
use crate::cli::style::Stylize;
use anstream::{eprintln, println};
use pr_automerge::automation::{RunOutcome, RunSummary, run_with_service};
use pr_automerge::config::AutomationConfig;
use pr_automerge::error::Result;
use pr_automerge::notify::{ConsoleStream, Notifier};
use std::process::ExitCode;

/// Command-line overrides for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// First PR number (overrides `PR_RANGE_START`)
    pub start: Option<u64>,
    /// Last PR number (overrides `PR_RANGE_END`)
    pub end: Option<u64>,
    /// Repository (overrides `GITHUB_REPOSITORY`)
    pub repo: Option<String>,
    /// Force dry-run mode
    pub dry_run: bool,
    /// Print the summary as JSON instead of text
    pub json: bool,
}

impl RunOptions {
    fn apply(&self, config: &mut AutomationConfig) {
        if let Some(start) = self.start {
            config.range_start = start;
        }
        if let Some(end) = self.end {
            config.range_end = end;
        }
        if let Some(ref repo) = self.repo {
            config.repository = Some(repo.clone());
        }
        if self.dry_run {
            config.dry_run = true;
        }
    }
}

/// Run the automation.
///
/// With `--json`, stdout carries only the JSON report; notifications and
/// the connection failure line go to stderr.
pub async fn run_automation(mut config: AutomationConfig, options: &RunOptions) -> Result<ExitCode> {
    options.apply(&mut config);

    if !options.json {
        print_configuration(&config);
    }

    let service = create_service(&config)?;
    let stream = if options.json {
        ConsoleStream::Stderr
    } else {
        ConsoleStream::Stdout
    };
    let notifier = Notifier::console(config.notifications_enabled, stream);

    let outcome = run_with_service(&service, &config, notifier).await;

    if matches!(outcome, RunOutcome::ConnectionFailed) {
        eprintln!("{} Failed to connect to GitHub API", "❌".error());
    }
    if options.json {
        println!("{}", outcome.to_json()?);
    } else if let Some(summary) = outcome.summary() {
        print_summary(summary);
    }

    Ok(ExitCode::from(outcome.exit_status()))
}

fn print_configuration(config: &AutomationConfig) {
    let labels = if config.required_labels.is_empty() {
        "None".to_string()
    } else {
        config.required_labels.join(", ")
    };

    println!("🚀 {}", "Starting GitHub PR Automation".emphasis());
    println!("📊 Configuration:");
    println!(
        "   - Repository: {}",
        config.repository.as_deref().unwrap_or("(not set)").accent()
    );
    println!(
        "   - PR Range: {}",
        format!("#{}-#{}", config.range_start, config.range_end).accent()
    );
    println!("   - Auto-merge: {}", config.auto_merge_enabled);
    println!("   - Dry run: {}", config.dry_run);
    println!("   - Min reviews: {}", config.min_reviews);
    println!("   - Status checks required: {}", config.require_status_checks);
    println!("   - Required labels: {labels}");
    println!();
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📈 {}", "Final Summary:".emphasis());
    println!("   - Total PRs processed: {}", summary.total_prs);
    println!(
        "   - Successfully merged: {}",
        summary.merged.to_string().success()
    );
    println!("   - Skipped (criteria not met): {}", summary.skipped);
    let errors = summary.errors.to_string();
    if summary.is_success() {
        println!("   - Errors: {errors}");
    } else {
        println!("   - Errors: {}", errors.error());
    }
}
