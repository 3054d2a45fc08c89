//! Error types for release-note generation.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release-note operations
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// Main error type for all release-note operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// Configuration errors, raised before any network call
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// Checkpoint state errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The run was cancelled by a signal
    #[error("Operation cancelled")]
    Cancelled,

    /// Resolution failed but the partial state was checkpointed
    #[error("{source} (progress saved to {})", state_file.display())]
    Resumable {
        /// Error that aborted the resolution
        source: Box<ChangelogError>,
        /// Checkpoint holding the partial state
        state_file: PathBuf,
    },

    /// Resolution failed and the checkpoint could not be written either
    #[error("{source}; additionally the checkpoint could not be written: {persist}")]
    Unpersisted {
        /// Error that aborted the resolution
        source: Box<ChangelogError>,
        /// Error raised while writing the checkpoint
        persist: StateError,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Repository is not of the form owner/repo
    #[error("Invalid repo name '{value}': expected owner/repo")]
    InvalidRepo {
        /// Value supplied by the operator
        value: String,
    },

    /// Required argument missing or empty
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Last stable version is not of the form x.y
    #[error("Invalid last stable version '{value}': should be of the format 'x.y'")]
    InvalidLastStable {
        /// Value supplied by the operator
        value: String,
    },

    /// Unknown release-note category
    #[error("Unknown release label '{value}'")]
    InvalidReleaseLabel {
        /// Value supplied by the operator
        value: String,
    },

    /// No GitHub token available
    #[error("GitHub token not provided. Set GH_TOKEN or GITHUB_TOKEN or use --github-token")]
    MissingToken,
}

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Resource does not exist
    #[error("Not found: {resource}")]
    NotFound {
        /// Resource that was requested
        resource: String,
    },

    /// Rate limit exhausted
    #[error("GitHub rate limit exceeded (resets at epoch {reset_at:?})")]
    RateLimited {
        /// Reset time as unix epoch seconds, when reported
        reset_at: Option<u64>,
    },

    /// Call exceeded its deadline
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// Operation that timed out
        operation: String,
        /// Deadline in seconds
        seconds: u64,
    },

    /// Unexpected HTTP status
    #[error("{operation} failed with HTTP {status}: {message}")]
    Status {
        /// Operation that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Message returned by the API
        message: String,
    },

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Failed to decode {operation} response: {reason}")]
    Decode {
        /// Operation whose response failed to decode
        operation: String,
        /// Reason for the error
        reason: String,
    },

    /// API URL could not be built
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Checkpoint state errors
#[derive(Error, Debug)]
pub enum StateError {
    /// State file corrupted
    #[error("State file corrupted: {reason}")]
    Corrupted {
        /// Reason for the error
        reason: String,
    },

    /// State file not found
    #[error("State file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// State version mismatch
    #[error("State file version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Found version
        found: String,
    },

    /// Failed to save state
    #[error("Failed to save state: {reason}")]
    SaveFailed {
        /// Reason for the error
        reason: String,
    },

    /// Failed to load state
    #[error("Failed to load state: {reason}")]
    LoadFailed {
        /// Reason for the error
        reason: String,
    },
}

impl GitHubError {
    /// Whether the error means the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound { .. })
    }
}

impl ChangelogError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ChangelogError::Config(ConfigError::MissingToken) => vec![
                "Export a token: export GITHUB_TOKEN=<token>".to_string(),
                "Or pass it explicitly with --github-token".to_string(),
            ],
            ChangelogError::Config(ConfigError::InvalidRepo { .. }) => {
                vec!["Pass the repository as --repo owner/repo".to_string()]
            }
            ChangelogError::GitHub(GitHubError::RateLimited { reset_at }) => {
                let mut suggestions = vec!["Wait for the GitHub rate limit to reset".to_string()];
                if let Some(reset) = reset_at
                    && let Some(when) = chrono::DateTime::from_timestamp(*reset as i64, 0)
                {
                    suggestions.push(format!("The limit resets at {}", when.to_rfc3339()));
                }
                suggestions
            }
            ChangelogError::Resumable { source, state_file } => {
                let mut suggestions = vec![format!(
                    "Re-run with --state-file={} to continue where this run stopped",
                    state_file.display()
                )];
                suggestions.extend(source.recovery_suggestions());
                suggestions
            }
            ChangelogError::Unpersisted { .. } => vec![
                "Check that the checkpoint directory is writable".to_string(),
                "The next run resumes from the last checkpoint written successfully, if any".to_string(),
            ],
            ChangelogError::State(StateError::VersionMismatch { .. })
            | ChangelogError::State(StateError::Corrupted { .. }) => vec![
                "Remove the checkpoint with the cleanup command and start over".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error is recoverable by re-running
    pub fn is_recoverable(&self) -> bool {
        match self {
            ChangelogError::Config(_) => false,
            ChangelogError::State(StateError::VersionMismatch { .. })
            | ChangelogError::State(StateError::Corrupted { .. }) => false,
            ChangelogError::Resumable { source, .. } => source.is_recoverable(),
            _ => true,
        }
    }
}
