//! Run configuration for release-note generation.
//!
//! Every component receives the parts of [`ChangelogConfig`] it needs as an
//! immutable value; nothing here is global.

use crate::changelog::ReleaseCategory;
use crate::error::{ConfigError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default per-call deadline in seconds
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 45;

const MAX_CALL_TIMEOUT_SECS: u64 = 300;

/// GitHub repository identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName {
    /// Organization or user
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl FromStr for RepoName {
    type Err = ConfigError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepo {
            value: value.to_string(),
        };
        let (owner, repo) = value.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Options that only affect rendering, never resolution
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Only render PRs carrying one of these labels (empty = all)
    pub label_filters: Vec<String>,
    /// Stable branch (x.y) whose backported PRs are left out
    pub last_stable: Option<String>,
    /// Omit the "(#N, @author)" suffix
    pub exclude_pr_references: bool,
    /// Omit the "Summary of Changes" header
    pub skip_header: bool,
    /// Restrict rendering to these categories (empty = all, default order)
    pub release_labels: Vec<ReleaseCategory>,
}

/// Connection settings for the GitHub API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// REST endpoint root
    pub base_url: String,
    /// Bearer token
    pub token: Option<String>,
    /// Deadline applied to every single API call
    pub call_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Parse a timeout in seconds from an environment variable, clamped to [1, max]
    fn parse_timeout_env(var_name: &str, default: u64, max: u64) -> u64 {
        std::env::var(var_name)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|v| v.clamp(1, max))
            .unwrap_or(default)
    }

    /// Create config from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let token = std::env::var("GH_TOKEN")
            .ok()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty());
        let base_url = std::env::var("KODEGEN_GITHUB_API_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let secs = Self::parse_timeout_env(
            "KODEGEN_GITHUB_TIMEOUT",
            DEFAULT_CALL_TIMEOUT_SECS,
            MAX_CALL_TIMEOUT_SECS,
        );

        Self {
            base_url,
            token,
            call_timeout: Duration::from_secs(secs),
        }
    }

    /// Override the deadline, clamped like the environment value
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.call_timeout = Duration::from_secs(secs.clamp(1, MAX_CALL_TIMEOUT_SECS));
        self
    }
}

/// Complete configuration for one changelog run
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    /// Repository the range lives in
    pub repo: RepoName,
    /// Base reference (exclusive)
    pub base: String,
    /// Head reference (inclusive)
    pub head: String,
    /// Checkpoint file
    pub state_file: PathBuf,
    /// Rendering options
    pub render: RenderOptions,
    /// API connection settings
    pub api: ApiConfig,
}

impl ChangelogConfig {
    /// Validate the configuration before any network call
    pub fn validate(&self) -> Result<()> {
        if self.base.trim().is_empty() {
            return Err(ConfigError::MissingArgument {
                argument: "--base".to_string(),
            }
            .into());
        }
        if self.head.trim().is_empty() {
            return Err(ConfigError::MissingArgument {
                argument: "--head".to_string(),
            }
            .into());
        }
        if self.state_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingArgument {
                argument: "--state-file".to_string(),
            }
            .into());
        }
        if let Some(last_stable) = &self.render.last_stable {
            validate_last_stable(last_stable)?;
        }
        Ok(())
    }
}

/// A stable version must be `x.y`, without a `v` prefix; blank disables suppression
pub fn validate_last_stable(value: &str) -> std::result::Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let invalid = || ConfigError::InvalidLastStable {
        value: value.to_string(),
    };
    if value.split('.').count() != 2 {
        return Err(invalid());
    }
    semver::Version::parse(&format!("{value}.0")).map_err(|_| invalid())?;
    Ok(())
}
