//! Commit to pull request resolution and backport linking.
//!
//! Commits are resolved one at a time, in the order stored in the state.
//! Progress lives entirely in [`ResolutionState`]: a commit is removed from
//! the pending list only once every PR it maps to has been recorded, so a
//! failed run can be resumed from the checkpoint without refetching.

use super::classify::{PrClass, classify, upstream_entry};
use crate::error::{ChangelogError, Result};
use crate::github::{ApiGuard, CommitId, PlatformApi, PullRequestPayload};
use crate::state::ResolutionState;
use std::fmt;

/// A recoverable condition met during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// No closed or known PR references the commit
    NoPullRequest {
        /// Commit SHA
        commit: CommitId,
    },
    /// An upstream PR named by a backport does not exist
    UpstreamNotFound {
        /// Backport PR number
        backport: u64,
        /// Missing upstream PR number
        upstream: u64,
    },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::NoPullRequest { commit } => {
                write!(f, "PR not found for commit {commit}")
            }
            ResolutionWarning::UpstreamNotFound { backport, upstream } => {
                write!(f, "upstream PR #{upstream} of backport PR #{backport} not found")
            }
        }
    }
}

/// Summary of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Commits processed in this pass
    pub resolved_commits: usize,
    /// Recoverable conditions, in the order they were met
    pub warnings: Vec<ResolutionWarning>,
}

impl ResolutionReport {
    fn warn(&mut self, warning: ResolutionWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Resolves pending commits into standalone and backport PRs
pub struct Resolver<'a, A> {
    api: &'a A,
    guard: &'a ApiGuard,
}

impl<'a, A: PlatformApi> Resolver<'a, A> {
    /// Create a resolver over `api`, with every call bounded by `guard`
    pub fn new(api: &'a A, guard: &'a ApiGuard) -> Self {
        Self { api, guard }
    }

    /// Resolve every pending commit in `state`.
    ///
    /// On error `state.commits` holds exactly the commits not yet fully
    /// processed, starting with the one that failed.
    pub async fn resolve(&self, state: &mut ResolutionState) -> Result<ResolutionReport> {
        let commits = std::mem::take(&mut state.commits);
        let mut report = ResolutionReport::default();

        log::info!("Resolving {} commits", commits.len());
        for (i, sha) in commits.iter().enumerate() {
            if let Err(e) = self.resolve_commit(sha, state, &mut report).await {
                state.commits = commits[i..].to_vec();
                return Err(e);
            }
            report.resolved_commits += 1;
        }

        log::info!(
            "Found {} PRs and {} backport PRs",
            state.pull_requests.len(),
            state.backport_prs.len()
        );
        Ok(report)
    }

    async fn resolve_commit(
        &self,
        sha: &str,
        state: &mut ResolutionState,
        report: &mut ResolutionReport,
    ) -> Result<()> {
        let operation = format!("list pull requests for commit {sha}");
        let mut page = 1;
        let mut found = false;

        loop {
            let listing = self
                .guard
                .call(&operation, self.api.pull_requests_for_commit(sha, page))
                .await?;

            for payload in &listing.items {
                if state.is_classified(payload.number) {
                    found = true;
                    continue;
                }
                if !payload.is_closed() {
                    log::debug!("Skipping PR #{} in state {}", payload.number, payload.state);
                    continue;
                }
                found = true;

                match classify(payload) {
                    PrClass::Standalone(pr) => {
                        state.pull_requests.insert(payload.number, pr);
                        state
                            .node_ids
                            .insert(payload.number, payload.node_id.clone());
                    }
                    PrClass::Backport(upstreams) => {
                        self.link_backport(payload, &upstreams, state, report)
                            .await?;
                    }
                }
            }

            match listing.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        if !found {
            report.warn(ResolutionWarning::NoPullRequest {
                commit: sha.to_string(),
            });
        }
        Ok(())
    }

    /// Record `backport` and fetch each upstream PR it names.
    ///
    /// A missing upstream is skipped with a warning. Any other failure
    /// removes the backport again so the commit is redone on resume.
    async fn link_backport(
        &self,
        backport: &PullRequestPayload,
        upstreams: &[u64],
        state: &mut ResolutionState,
        report: &mut ResolutionReport,
    ) -> Result<()> {
        let number = backport.number;
        state.backport_prs.entry(number).or_default();
        state.node_ids.insert(number, backport.node_id.clone());

        for &upstream in upstreams {
            let linked = state
                .backport_prs
                .get(&number)
                .is_some_and(|links| links.contains_key(&upstream));
            if linked {
                continue;
            }

            let operation = format!("pull request #{upstream}");
            let upstream_pr = match self
                .guard
                .call(&operation, self.api.pull_request(upstream))
                .await
            {
                Ok(pr) => pr,
                Err(ChangelogError::GitHub(e)) if e.is_not_found() => {
                    report.warn(ResolutionWarning::UpstreamNotFound {
                        backport: number,
                        upstream,
                    });
                    continue;
                }
                Err(e) => {
                    state.backport_prs.remove(&number);
                    state.node_ids.remove(&number);
                    return Err(e);
                }
            };

            state.node_ids.insert(upstream, upstream_pr.node_id.clone());
            state
                .backport_prs
                .entry(number)
                .or_default()
                .insert(upstream, upstream_entry(&upstream_pr));
        }
        Ok(())
    }
}
