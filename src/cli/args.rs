//! Command line argument parsing and validation.

use crate::changelog::ReleaseCategory;
use crate::config::{ApiConfig, ChangelogConfig, RenderOptions, RepoName};
use crate::error::{ConfigError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default checkpoint location
pub const DEFAULT_STATE_FILE: &str = "release-state.json";

/// Release-note generator for GitHub repositories
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_release_notes",
    version,
    about = "Generate release notes from the pull requests in a commit range",
    long_about = "Resolve every commit between two refs to the pull request that merged it,
link backport PRs to their upstream PRs, and print a categorised changelog.

Progress is checkpointed to a state file; re-running with the same file
resumes an interrupted run.

Usage:
  kodegen_release_notes generate --repo cilium/cilium --base v1.15.0 --head v1.15.1
  kodegen_release_notes status --state-file release-state.json
  kodegen_release_notes cleanup --yes"
)]
pub struct Args {
    /// Command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Show detailed progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the changelog and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a commit range and print its changelog
    Generate {
        /// GitHub repository as owner/repo
        #[arg(long)]
        repo: String,

        /// Base reference (exclusive)
        #[arg(long)]
        base: String,

        /// Head reference (inclusive)
        #[arg(long)]
        head: String,

        /// Last stable branch (x.y); PRs already backported to it are left out
        #[arg(long, value_name = "X.Y")]
        last_stable: Option<String>,

        /// Checkpoint file; resumed when it exists
        #[arg(long, default_value = DEFAULT_STATE_FILE)]
        state_file: PathBuf,

        /// Only include PRs carrying this label (repeatable)
        #[arg(long = "label-filter", value_name = "LABEL")]
        label_filters: Vec<String>,

        /// Only render these categories, e.g. bug,minor or release-note/bug
        #[arg(long, value_delimiter = ',')]
        release_labels: Vec<String>,

        /// Omit PR numbers and authors from each line
        #[arg(long)]
        exclude_pr_references: bool,

        /// Omit the "Summary of Changes" header
        #[arg(long)]
        skip_header: bool,

        /// Write the changelog to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// GitHub token (defaults to GH_TOKEN or GITHUB_TOKEN)
        #[arg(long)]
        github_token: Option<String>,

        /// Per-call API timeout in seconds
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,
    },

    /// Summarise an existing checkpoint
    Status {
        /// Checkpoint file
        #[arg(long, default_value = DEFAULT_STATE_FILE)]
        state_file: PathBuf,

        /// Print the checkpoint as JSON
        #[arg(long)]
        json: bool,

        /// Show per-category counts and pending commits
        #[arg(long)]
        detailed: bool,
    },

    /// Delete a checkpoint
    Cleanup {
        /// Checkpoint file
        #[arg(long, default_value = DEFAULT_STATE_FILE)]
        state_file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Generate { .. } => "generate",
            Command::Status { .. } => "status",
            Command::Cleanup { .. } => "cleanup",
        }
    }

    /// Build the run configuration of a `generate` command.
    ///
    /// Flags override the environment; the result is validated before return.
    pub fn changelog_config(&self) -> Result<ChangelogConfig> {
        let Command::Generate {
            repo,
            base,
            head,
            last_stable,
            state_file,
            label_filters,
            release_labels,
            exclude_pr_references,
            skip_header,
            github_token,
            timeout,
            ..
        } = self
        else {
            return Err(ConfigError::MissingArgument {
                argument: "generate".to_string(),
            }
            .into());
        };

        let repo: RepoName = repo.parse()?;
        let release_labels = release_labels
            .iter()
            .map(|label| label.parse::<ReleaseCategory>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut api = ApiConfig::from_env();
        if let Some(token) = github_token.as_ref().filter(|t| !t.trim().is_empty()) {
            api.token = Some(token.clone());
        }
        if let Some(secs) = timeout {
            api = api.with_timeout_secs(*secs);
        }

        let config = ChangelogConfig {
            repo,
            base: base.clone(),
            head: head.clone(),
            state_file: state_file.clone(),
            render: RenderOptions {
                label_filters: label_filters.clone(),
                last_stable: last_stable
                    .clone()
                    .filter(|stable| !stable.trim().is_empty()),
                exclude_pr_references: *exclude_pr_references,
                skip_header: *skip_header,
                release_labels,
            },
            api,
        };
        config.validate()?;

        if config.api.token.is_none() {
            return Err(ConfigError::MissingToken.into());
        }
        Ok(config)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn test_generate_builds_config() {
        let args = parse(&[
            "kodegen_release_notes",
            "generate",
            "--repo",
            "cilium/cilium",
            "--base",
            "v1.15.0",
            "--head",
            "v1.15.1",
            "--label-filter",
            "area/datapath",
            "--label-filter",
            "kind/bug",
            "--release-labels",
            "bug,release-note/minor",
            "--github-token",
            "secret",
            "--timeout",
            "10",
        ]);
        let config = args.command.changelog_config().expect("config");

        assert_eq!(config.repo.to_string(), "cilium/cilium");
        assert_eq!(config.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(config.render.label_filters.len(), 2);
        assert_eq!(
            config.render.release_labels,
            vec![ReleaseCategory::Bug, ReleaseCategory::Minor]
        );
        assert_eq!(config.api.token.as_deref(), Some("secret"));
        assert_eq!(config.api.call_timeout.as_secs(), 10);
    }

    #[test]
    fn test_generate_rejects_invalid_repo() {
        let args = parse(&[
            "kodegen_release_notes",
            "generate",
            "--repo",
            "cilium",
            "--base",
            "a",
            "--head",
            "b",
            "--github-token",
            "secret",
        ]);
        assert!(args.command.changelog_config().is_err());
    }

    #[test]
    fn test_generate_rejects_unknown_release_label() {
        let args = parse(&[
            "kodegen_release_notes",
            "generate",
            "--repo",
            "cilium/cilium",
            "--base",
            "a",
            "--head",
            "b",
            "--release-labels",
            "feature",
            "--github-token",
            "secret",
        ]);
        assert!(args.command.changelog_config().is_err());
    }

    #[test]
    fn test_blank_last_stable_disables_suppression() {
        let args = parse(&[
            "kodegen_release_notes",
            "generate",
            "--repo",
            "cilium/cilium",
            "--base",
            "v1.15.0",
            "--head",
            "v1.15.1",
            "--last-stable",
            "",
            "--github-token",
            "secret",
        ]);
        let config = args.command.changelog_config().expect("config");
        assert_eq!(config.render.last_stable, None);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Args::try_parse_from(["kodegen_release_notes", "-v", "-q", "status"]);
        assert!(result.is_err());
    }
}
