//! pr-automerge - merge GitHub pull requests that meet readiness criteria

mod cli;

use anstream::eprintln;
use clap::{Args, Parser, Subcommand};
use cli::RunOptions;
use pr_automerge::config::AutomationConfig;
use pr_automerge::error::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pr-automerge")]
#[command(about = "Merge GitHub pull requests that meet approval, label, CI and mergeability criteria")]
#[command(version)]
struct Cli {
    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a PR range and merge the PRs that qualify (default)
    Run(RunArgs),
    /// Verify the token and repository access
    Check,
    /// Show the GitHub API rate limits for the token
    RateLimit,
}

#[derive(Args, Default)]
struct RunArgs {
    /// First PR number to scan (overrides PR_RANGE_START)
    #[arg(long)]
    start: Option<u64>,

    /// Last PR number to scan, inclusive (overrides PR_RANGE_END)
    #[arg(long)]
    end: Option<u64>,

    /// Repository as owner/name (overrides GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// Evaluate PRs but don't merge anything
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl From<RunArgs> for RunOptions {
    fn from(args: RunArgs) -> Self {
        Self {
            start: args.start,
            end: args.end,
            repo: args.repo,
            dry_run: args.dry_run,
            json: args.json,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "pr_automerge=info,warn",
        _ => "pr_automerge=debug,info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(cli: Cli) -> Result<ExitCode> {
    let config = AutomationConfig::from_env(cli.env_file.as_deref())?;

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => cli::run_automation(config, &args.into()).await,
        Commands::Check => cli::run_check(&config).await,
        Commands::RateLimit => cli::run_rate_limit(&config).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Fatal error in automation: {e}");
            ExitCode::FAILURE
        }
    }
}
