//! GitHub integration for release-note generation.
//!
//! [`PlatformApi`] is the read-only port the engine depends on; [`GitHubClient`]
//! is its REST implementation.

mod client;
mod guard;
mod models;
mod pagination;

pub use client::GitHubClient;
pub use guard::ApiGuard;
pub use models::{
    CommitId, CommitWindow, IssueSummary, Label, Page, PullRequestPayload, User,
};
pub use pagination::next_page_from_link;

use crate::error::GitHubError;
use async_trait::async_trait;

/// Read operations the engine needs from the hosting platform
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Commits between `base` and `head`, ordered base to head.
    ///
    /// The window may be truncated to the most recent commits of the range.
    async fn compare_commits(&self, base: &str, head: &str)
    -> Result<CommitWindow, GitHubError>;

    /// One page of pull requests associated with a commit
    async fn pull_requests_for_commit(
        &self,
        sha: &str,
        page: u32,
    ) -> Result<Page<PullRequestPayload>, GitHubError>;

    /// A single pull request; [`GitHubError::NotFound`] when it does not exist
    async fn pull_request(&self, number: u64) -> Result<PullRequestPayload, GitHubError>;

    /// One page of issue/PR search results
    async fn search_issues(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Page<IssueSummary>, GitHubError>;
}
