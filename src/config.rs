//! Automation configuration
//!
//! Loaded once at startup from environment-style key/value pairs (optionally
//! sourced from a `.env` file) and passed explicitly into every component.

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment key holding the GitHub token
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment key holding the `owner/name` repository identifier
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
/// Environment key for a GitHub Enterprise host
pub const HOST_VAR: &str = "GITHUB_HOST";

const DEFAULT_RANGE_START: u64 = 22;
const DEFAULT_RANGE_END: u64 = 34;

/// Immutable configuration for one automation run
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AutomationConfig {
    /// GitHub token (None if not configured)
    pub token: Option<String>,
    /// Repository identifier in `owner/name` form (None if not configured)
    pub repository: Option<String>,
    /// GitHub Enterprise host, None for github.com
    pub host: Option<String>,
    /// Gate for all notifications
    pub notifications_enabled: bool,
    /// Simulate merges without mutating anything
    pub dry_run: bool,
    /// Master switch for merge mutations
    pub auto_merge_enabled: bool,
    /// Minimum number of distinct approvers
    pub min_reviews: usize,
    /// Whether CI status gates the merge
    pub require_status_checks: bool,
    /// Labels that must all be present, in configured order
    pub required_labels: Vec<String>,
    /// First PR number to scan (inclusive)
    pub range_start: u64,
    /// Last PR number to scan (inclusive)
    pub range_end: u64,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            host: None,
            notifications_enabled: true,
            dry_run: false,
            auto_merge_enabled: true,
            min_reviews: 1,
            require_status_checks: true,
            required_labels: Vec::new(),
            range_start: DEFAULT_RANGE_START,
            range_end: DEFAULT_RANGE_END,
        }
    }
}

impl AutomationConfig {
    /// Load configuration from the process environment.
    ///
    /// Values from `env_file` (or `.env` in the working directory when no
    /// file is given) are loaded first; variables already set in the
    /// environment win.
    pub fn from_env(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    Error::Config(format!("failed to load {}: {e}", path.display()))
                })?;
            }
            None => ignore_missing_env_file(dotenvy::dotenv())?,
        }
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from key/value pairs.
    ///
    /// Token and repository are not validated here; see
    /// [`AutomationConfig::platform_config`].
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let get = |key: &str| vars.get(key).map(String::as_str);
        let defaults = Self::default();

        Ok(Self {
            token: get(TOKEN_VAR).filter(|s| !s.is_empty()).map(String::from),
            repository: get(REPOSITORY_VAR)
                .filter(|s| !s.is_empty())
                .map(String::from),
            host: get(HOST_VAR).filter(|s| !s.is_empty()).map(String::from),
            notifications_enabled: get("ENABLE_NOTIFICATIONS")
                .map_or(defaults.notifications_enabled, parse_flag),
            dry_run: get("DRY_RUN").map_or(defaults.dry_run, parse_flag),
            auto_merge_enabled: get("ENABLE_AUTO_MERGE")
                .map_or(defaults.auto_merge_enabled, parse_flag),
            min_reviews: get("MIN_REVIEWS")
                .map_or(Ok(defaults.min_reviews), |v| parse_number("MIN_REVIEWS", v))?,
            require_status_checks: get("REQUIRE_STATUS_CHECKS")
                .map_or(defaults.require_status_checks, parse_flag),
            required_labels: get("REQUIRED_LABELS").map(parse_labels).unwrap_or_default(),
            range_start: get("PR_RANGE_START")
                .map_or(Ok(defaults.range_start), |v| parse_number("PR_RANGE_START", v))?,
            range_end: get("PR_RANGE_END")
                .map_or(Ok(defaults.range_end), |v| parse_number("PR_RANGE_END", v))?,
        })
    }

    /// Resolve the platform target, failing if token or repository is absent.
    ///
    /// Returns the token alongside the parsed repository coordinates.
    pub fn platform_config(&self) -> Result<(String, PlatformConfig)> {
        let token = self
            .token
            .clone()
            .ok_or_else(|| Error::Config(format!("{TOKEN_VAR} is not set")))?;
        let repository = self
            .repository
            .as_deref()
            .ok_or_else(|| Error::Config(format!("{REPOSITORY_VAR} is not set")))?;
        let (owner, repo) = parse_repository(repository)?;

        Ok((
            token,
            PlatformConfig {
                owner,
                repo,
                host: self.host.clone(),
            },
        ))
    }

    /// The inclusive range of PR numbers to scan
    pub const fn pr_range(&self) -> RangeInclusive<u64> {
        self.range_start..=self.range_end
    }
}

/// A missing `.env` is the normal case; a malformed one is not.
fn ignore_missing_env_file(result: std::result::Result<PathBuf, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Config(format!("failed to load .env: {e}"))),
    }
}

/// A flag is on only when its value is literally `true` (case-insensitive).
fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key} must be a non-negative integer, got {value:?}: {e}")))
}

fn parse_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}

/// Split `owner/name` into its parts
pub fn parse_repository(value: &str) -> Result<(String, String)> {
    match value.trim().split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "{REPOSITORY_VAR} must be in owner/name form, got {value:?}"
        ))),
    }
}
