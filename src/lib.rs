//! # Kodegen Release Notes
//!
//! Changelog generation for GitHub repositories that maintain stable branches
//! through backport pull requests.
//!
//! Given two refs, the crate enumerates every commit in between, resolves each
//! commit to the pull request that merged it, links backport PRs to the
//! upstream PRs they reapply, and renders a changelog grouped by release-note
//! category.
//!
//! ## Features
//!
//! - **Complete ranges**: truncated compare windows are walked until the base is reached
//! - **Backport linking**: `upstream-prs` blocks are followed to the original PRs
//! - **Resumable runs**: progress is checkpointed to a JSON state file on every exit
//! - **Render-time filtering**: label filters and category selection never touch the checkpoint
//! - **Last-stable suppression**: PRs already backported to the previous stable branch are listed separately
//!
//! ## Usage
//!
//! ```bash
//! kodegen_release_notes generate --repo cilium/cilium --base v1.15.0 --head v1.15.1
//! kodegen_release_notes generate --repo cilium/cilium --base v1.15.0 --head v1.15.1 \
//!     --last-stable 1.14 --label-filter area/datapath --output CHANGELOG.md
//! kodegen_release_notes status --detailed
//! kodegen_release_notes cleanup --yes
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod state;

// Re-export main types for public API
pub use changelog::{
    Changelog, ReleaseCategory, RenderedChangelog, ResolutionReport, ResolutionWarning, Resolver,
    generate,
};
pub use cli::Args;
pub use config::{ApiConfig, ChangelogConfig, RenderOptions, RepoName};
pub use error::{ChangelogError, ConfigError, GitHubError, Result, StateError};
pub use github::{ApiGuard, GitHubClient, PlatformApi};
pub use state::{PullRequest, ResolutionState, StateManager};
