//! Resolution state tracking and serialization.

use crate::changelog::ReleaseCategory;
use crate::error::{Result, StateError};
use crate::github::CommitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Current version of the checkpoint format
pub const STATE_FORMAT_VERSION: u32 = 1;

/// Release-relevant data of one pull request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Note text from the `release-note` block, or the title
    pub release_note: String,
    /// Release-note category
    pub release_label: ReleaseCategory,
    /// Author login
    pub author_name: String,
    /// All labels, kept so label filters can change between runs
    #[serde(default)]
    pub labels: Vec<String>,
    /// `backport-done/<branch>` labels; always empty for upstream PRs
    #[serde(default)]
    pub backport_branches: Vec<String>,
}

/// Standalone PRs keyed by number
pub type PullRequests = BTreeMap<u64, PullRequest>;

/// Backport PR number to its upstream PRs
pub type BackportPrs = BTreeMap<u64, PullRequests>;

/// PR number to GraphQL node id
pub type NodeIds = BTreeMap<u64, String>;

/// Everything resolved so far, plus the commits still to resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionState {
    /// Version of the checkpoint format
    pub format_version: u32,
    /// When the checkpoint was last written
    #[serde(default)]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Backport associations
    pub backport_prs: BackportPrs,
    /// Standalone PRs
    pub pull_requests: PullRequests,
    /// Node ids of every PR touched
    pub node_ids: NodeIds,
    /// Commits not yet resolved, in processing order
    pub commits: Vec<CommitId>,
}

impl Default for ResolutionState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ResolutionState {
    /// Fresh state for a list of commits
    pub fn new(commits: Vec<CommitId>) -> Self {
        Self {
            format_version: STATE_FORMAT_VERSION,
            saved_at: None,
            backport_prs: BackportPrs::new(),
            pull_requests: PullRequests::new(),
            node_ids: NodeIds::new(),
            commits,
        }
    }

    /// Whether `number` was already classified, as a standalone or a backport PR
    pub fn is_classified(&self, number: u64) -> bool {
        self.pull_requests.contains_key(&number) || self.backport_prs.contains_key(&number)
    }

    /// Whether resolution has finished
    pub fn is_complete(&self) -> bool {
        self.commits.is_empty()
    }

    /// Every PR number touched: standalone, backport and upstream
    pub fn all_prs(&self) -> BTreeSet<u64> {
        let mut prs: BTreeSet<u64> = self.pull_requests.keys().copied().collect();
        for (backport, upstreams) in &self.backport_prs {
            prs.insert(*backport);
            prs.extend(upstreams.keys().copied());
        }
        prs
    }

    /// Validate state consistency
    pub fn validate(&self) -> Result<()> {
        if self.format_version != STATE_FORMAT_VERSION {
            return Err(StateError::VersionMismatch {
                expected: STATE_FORMAT_VERSION.to_string(),
                found: self.format_version.to_string(),
            }
            .into());
        }
        if let Some(number) = self
            .backport_prs
            .keys()
            .find(|&&number| self.pull_requests.contains_key(&number))
        {
            return Err(StateError::Corrupted {
                reason: format!("PR #{number} is recorded both as standalone and as backport"),
            }
            .into());
        }
        Ok(())
    }

    /// Create a summary of the state
    pub fn summary(&self) -> String {
        let upstreams: usize = self.backport_prs.values().map(|u| u.len()).sum();
        let progress = if self.is_complete() {
            "complete".to_string()
        } else {
            format!("{} commit(s) left to resolve", self.commits.len())
        };

        format!(
            "{} PR(s), {} backport PR(s) linking {} upstream PR(s) - {}",
            self.pull_requests.len(),
            self.backport_prs.len(),
            upstreams,
            progress
        )
    }
}
