//! In-memory GitHub used by the engine tests.

#![allow(dead_code)]

use kodegen_release_notes::github::{
    CommitWindow, IssueSummary, Label, Page, PlatformApi, PullRequestPayload, User,
};
use async_trait::async_trait;
use kodegen_release_notes::GitHubError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Base ref of every fake history
pub const BASE: &str = "v1.0.0";
/// Head ref of every fake history
pub const HEAD: &str = "v1.0.1";

/// Linear history between [`BASE`] and [`HEAD`] with canned PR data
pub struct FakeGitHub {
    /// Commits, oldest first
    history: Vec<String>,
    /// Largest compare window returned
    window_limit: usize,
    /// Pages of PRs per commit
    commit_prs: HashMap<String, Vec<Vec<PullRequestPayload>>>,
    /// PRs by number
    pulls: HashMap<u64, PullRequestPayload>,
    /// PR numbers whose fetch fails with a server error
    failing_pulls: Mutex<HashSet<u64>>,
    pub compare_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub pull_calls: AtomicUsize,
}

impl FakeGitHub {
    pub fn new(history: &[&str]) -> Self {
        Self {
            history: history.iter().map(|s| s.to_string()).collect(),
            window_limit: 250,
            commit_prs: HashMap::new(),
            pulls: HashMap::new(),
            failing_pulls: Mutex::new(HashSet::new()),
            compare_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            pull_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_window_limit(mut self, limit: usize) -> Self {
        self.window_limit = limit;
        self
    }

    /// Serve `prs` as the single page for `sha`
    pub fn with_commit(self, sha: &str, prs: Vec<PullRequestPayload>) -> Self {
        self.with_commit_pages(sha, vec![prs])
    }

    pub fn with_commit_pages(mut self, sha: &str, pages: Vec<Vec<PullRequestPayload>>) -> Self {
        self.commit_prs.insert(sha.to_string(), pages);
        self
    }

    pub fn with_pull(mut self, pr: PullRequestPayload) -> Self {
        self.pulls.insert(pr.number, pr);
        self
    }

    pub fn fail_pull(&self, number: u64) {
        self.failing_pulls
            .lock()
            .expect("lock poisoned")
            .insert(number);
    }

    pub fn heal_pull(&self, number: u64) {
        self.failing_pulls
            .lock()
            .expect("lock poisoned")
            .remove(&number);
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.compare_calls.load(Ordering::SeqCst),
            self.list_calls.load(Ordering::SeqCst),
            self.pull_calls.load(Ordering::SeqCst),
        )
    }

    /// Number of history entries at or below `reference`
    fn position(&self, reference: &str) -> usize {
        match reference {
            BASE => 0,
            HEAD => self.history.len(),
            sha => self
                .history
                .iter()
                .position(|c| c == sha)
                .map(|i| i + 1)
                .expect("unknown ref"),
        }
    }
}

#[async_trait]
impl PlatformApi for FakeGitHub {
    async fn compare_commits(&self, base: &str, head: &str) -> Result<CommitWindow, GitHubError> {
        self.compare_calls.fetch_add(1, Ordering::SeqCst);
        let (base, head) = (self.position(base), self.position(head));
        let range = &self.history[base..head.max(base)];
        let start = range.len().saturating_sub(self.window_limit);
        Ok(CommitWindow {
            commits: range[start..].to_vec(),
            total_commits: Some(range.len() as u64),
        })
    }

    async fn pull_requests_for_commit(
        &self,
        sha: &str,
        page: u32,
    ) -> Result<Page<PullRequestPayload>, GitHubError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let pages = self.commit_prs.get(sha).cloned().unwrap_or_default();
        let index = page.max(1) as usize - 1;
        let items = pages.get(index).cloned().unwrap_or_default();
        let next_page = (index + 1 < pages.len()).then_some(page.max(1) + 1);
        Ok(Page { items, next_page })
    }

    async fn pull_request(&self, number: u64) -> Result<PullRequestPayload, GitHubError> {
        self.pull_calls.fetch_add(1, Ordering::SeqCst);
        if self
            .failing_pulls
            .lock()
            .expect("lock poisoned")
            .contains(&number)
        {
            return Err(GitHubError::Status {
                operation: format!("pull request #{number}"),
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }
        self.pulls
            .get(&number)
            .cloned()
            .ok_or_else(|| GitHubError::NotFound {
                resource: format!("pull request #{number}"),
            })
    }

    async fn search_issues(
        &self,
        _query: &str,
        _page: u32,
    ) -> Result<Page<IssueSummary>, GitHubError> {
        Ok(Page::last(Vec::new()))
    }
}

/// Closed PR with the given data
pub fn closed_pr(
    number: u64,
    title: &str,
    body: &str,
    labels: &[&str],
    author: &str,
) -> PullRequestPayload {
    PullRequestPayload {
        number,
        state: "closed".to_string(),
        title: title.to_string(),
        body: Some(body.to_string()),
        labels: labels
            .iter()
            .map(|name| Label {
                name: name.to_string(),
            })
            .collect(),
        user: Some(User {
            login: author.to_string(),
        }),
        node_id: format!("PR_node_{number}"),
    }
}

/// Open PR with the given number
pub fn open_pr(number: u64) -> PullRequestPayload {
    PullRequestPayload {
        state: "open".to_string(),
        ..closed_pr(number, "work in progress", "", &[], "dave")
    }
}

/// Backport PR listing `upstreams` in a bare `upstream-prs` block
pub fn backport_pr(number: u64, upstreams: &[u64], author: &str) -> PullRequestPayload {
    let list: Vec<String> = upstreams.iter().map(u64::to_string).collect();
    let body = format!(
        "Backport of the PRs below.\n\n```upstream-prs\n{}\n```\n",
        list.join(" ")
    );
    closed_pr(
        number,
        &format!("[v1.0] backports {number}"),
        &body,
        &["kind/backports", "backport/1.0"],
        author,
    )
}
