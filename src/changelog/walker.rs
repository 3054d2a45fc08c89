//! Enumeration of every commit in `base...head`.
//!
//! The compare endpoint may return only the most recent part of a long range.
//! The walk therefore repeats the comparison with the head moved back to the
//! oldest commit seen so far, until a window adds nothing new.

use crate::error::Result;
use crate::github::{ApiGuard, CommitId, PlatformApi};

/// Outcome of folding one compare window into the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowStep {
    /// New commits, newest first
    pub collected: Vec<CommitId>,
    /// Head to compare against next
    pub next_head: Option<CommitId>,
    /// Nothing new was found; the range is exhausted
    pub done: bool,
}

/// Fold one window (ordered base to head) into the walk.
///
/// `prior_head` is the head the window was requested with when it is a
/// commit that was already collected; it is dropped from the window if the
/// API echoes it back as the last entry.
pub fn next_window(prior_head: Option<&str>, window: &[CommitId]) -> WindowStep {
    let fresh = match (prior_head, window.split_last()) {
        (Some(prior), Some((last, rest))) if last == prior => rest,
        _ => window,
    };

    let next_head = fresh.first().cloned();
    WindowStep {
        collected: fresh.iter().rev().cloned().collect(),
        done: next_head.is_none(),
        next_head,
    }
}

/// All commits reachable from `head` but not from `base`, newest first
pub async fn walk_commit_range<A: PlatformApi>(
    api: &A,
    guard: &ApiGuard,
    base: &str,
    head: &str,
) -> Result<Vec<CommitId>> {
    let mut commits = Vec::new();
    let mut head = head.to_string();
    let mut prior_head: Option<CommitId> = None;

    loop {
        log::info!("Comparing {}...{}", base, head);
        let operation = format!("compare {base}...{head}");
        let window = guard
            .call(&operation, api.compare_commits(base, &head))
            .await?;

        // The API says the whole remaining range fit in this window
        let complete = window
            .total_commits
            .is_some_and(|total| total <= window.commits.len() as u64);

        let step = next_window(prior_head.as_deref(), &window.commits);
        commits.extend(step.collected);

        match step.next_head {
            Some(next) if !step.done && !complete => {
                prior_head = Some(next.clone());
                head = next;
            }
            _ => break,
        }
    }

    log::info!("Found {} commits", commits.len());
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitHubError;
    use crate::github::{CommitWindow, IssueSummary, Page, PullRequestPayload};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn id(n: usize) -> CommitId {
        format!("c{n}")
    }

    fn ids(range: impl Iterator<Item = usize>) -> Vec<CommitId> {
        range.map(id).collect()
    }

    /// Linear history c0..=cN where compare returns at most `limit` commits
    struct LinearHistory {
        limit: usize,
        report_total: bool,
        calls: AtomicUsize,
    }

    impl LinearHistory {
        fn index(reference: &str) -> usize {
            reference
                .trim_start_matches('c')
                .parse()
                .expect("synthetic ref")
        }
    }

    #[async_trait]
    impl PlatformApi for LinearHistory {
        async fn compare_commits(
            &self,
            base: &str,
            head: &str,
        ) -> std::result::Result<CommitWindow, GitHubError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (base, head) = (Self::index(base), Self::index(head));
            let total = head.saturating_sub(base);
            let first = base + 1 + total.saturating_sub(self.limit);
            Ok(CommitWindow {
                commits: ids(first..=head),
                total_commits: self.report_total.then_some(total as u64),
            })
        }

        async fn pull_requests_for_commit(
            &self,
            _sha: &str,
            _page: u32,
        ) -> std::result::Result<Page<PullRequestPayload>, GitHubError> {
            Ok(Page::last(Vec::new()))
        }

        async fn pull_request(
            &self,
            number: u64,
        ) -> std::result::Result<PullRequestPayload, GitHubError> {
            Err(GitHubError::NotFound {
                resource: format!("pull request #{number}"),
            })
        }

        async fn search_issues(
            &self,
            _query: &str,
            _page: u32,
        ) -> std::result::Result<Page<IssueSummary>, GitHubError> {
            Ok(Page::last(Vec::new()))
        }
    }

    fn guard() -> ApiGuard {
        ApiGuard::new(Duration::from_secs(5), CancellationToken::new())
    }

    #[test]
    fn test_first_window_is_taken_whole() {
        let step = next_window(None, &ids(6..=10));
        assert_eq!(step.collected, ids((6..=10).rev()));
        assert_eq!(step.next_head, Some(id(6)));
        assert!(!step.done);
    }

    #[test]
    fn test_echoed_head_is_dropped() {
        let step = next_window(Some("c6"), &ids(2..=6));
        assert_eq!(step.collected, ids((2..=5).rev()));
        assert_eq!(step.next_head, Some(id(2)));
    }

    #[test]
    fn test_window_with_only_the_echoed_head_is_done() {
        let step = next_window(Some("c1"), &ids(1..=1));
        assert!(step.collected.is_empty());
        assert_eq!(step.next_head, None);
        assert!(step.done);
    }

    #[test]
    fn test_empty_window_is_done() {
        let step = next_window(None, &[]);
        assert!(step.done);
        assert!(step.collected.is_empty());
    }

    #[tokio::test]
    async fn test_walk_yields_exact_range_for_all_sizes_and_limits() {
        for report_total in [false, true] {
            for size in 0..=40 {
                for limit in 1..=9 {
                    let api = LinearHistory {
                        limit,
                        report_total,
                        calls: AtomicUsize::new(0),
                    };
                    let commits = walk_commit_range(&api, &guard(), "c0", &id(size))
                        .await
                        .expect("walk should succeed");
                    assert_eq!(
                        commits,
                        ids((1..=size).rev()),
                        "size {size}, limit {limit}, totals {report_total}"
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn test_walk_stops_after_one_call_when_range_fits() {
        let api = LinearHistory {
            limit: 250,
            report_total: true,
            calls: AtomicUsize::new(0),
        };
        let commits = walk_commit_range(&api, &guard(), "c0", "c3")
            .await
            .expect("walk should succeed");
        assert_eq!(commits, ids((1..=3).rev()));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_walk_with_offset_base() {
        let api = LinearHistory {
            limit: 4,
            report_total: false,
            calls: AtomicUsize::new(0),
        };
        let commits = walk_commit_range(&api, &guard(), "c10", "c21")
            .await
            .expect("walk should succeed");
        assert_eq!(commits, ids((11..=21).rev()));
    }
}
