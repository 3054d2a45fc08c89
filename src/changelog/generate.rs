//! End-to-end changelog generation with checkpointing.

use super::render::{RenderedChangelog, render};
use super::resolver::{ResolutionReport, Resolver};
use super::walker::walk_commit_range;
use crate::config::{ChangelogConfig, RenderOptions};
use crate::error::{ChangelogError, Result, StateError};
use crate::github::{ApiGuard, PlatformApi};
use crate::state::{NodeIds, ResolutionState, StateManager};
use std::collections::BTreeSet;
use tokio_util::sync::CancellationToken;

/// Fully resolved changelog, ready to render
#[derive(Debug, Clone)]
pub struct Changelog {
    state: ResolutionState,
    options: RenderOptions,
}

impl Changelog {
    /// Wrap a resolved state with the options to render it with
    pub fn new(state: ResolutionState, options: RenderOptions) -> Self {
        Self { state, options }
    }

    /// Underlying resolution state
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Render with the configured options
    pub fn render(&self) -> RenderedChangelog {
        render(&self.state, &self.options)
    }

    /// Every PR number in the changelog, with the node-id index
    pub fn all_prs(&self) -> (BTreeSet<u64>, &NodeIds) {
        (self.state.all_prs(), &self.state.node_ids)
    }
}

/// Resolve `config.base...config.head` into a [`Changelog`].
///
/// An existing checkpoint at `config.state_file` is resumed instead of
/// walking the range again. The state is checkpointed after resolution
/// whether it succeeded or not; a failed resolution is reported as
/// [`ChangelogError::Resumable`], or [`ChangelogError::Unpersisted`] when
/// the checkpoint could not be written either.
pub async fn generate<A: PlatformApi>(
    api: &A,
    config: &ChangelogConfig,
    cancel: CancellationToken,
) -> Result<(Changelog, ResolutionReport)> {
    config.validate()?;

    let guard = ApiGuard::new(config.api.call_timeout, cancel);
    let manager = StateManager::new(&config.state_file);

    let mut state = if manager.state_exists() {
        log::info!(
            "Found state file {}, resuming from stored state",
            config.state_file.display()
        );
        manager.load_state()?.state
    } else {
        let commits = walk_commit_range(api, &guard, &config.base, &config.head).await?;
        ResolutionState::new(commits)
    };

    let outcome = Resolver::new(api, &guard).resolve(&mut state).await;
    if outcome.is_err() {
        log::info!(
            "Storing state in {} before exiting due to error",
            config.state_file.display()
        );
    }
    let saved = manager.save_state(&mut state);

    match (outcome, saved) {
        (Ok(report), saved) => {
            match saved {
                Ok(result) => log::info!("{}", result.format_result()),
                Err(e) => log::warn!("Unable to store state: {}", e),
            }
            Ok((Changelog::new(state, config.render.clone()), report))
        }
        (Err(source), Ok(_)) => Err(ChangelogError::Resumable {
            source: Box::new(source),
            state_file: config.state_file.clone(),
        }),
        (Err(source), Err(persist)) => Err(ChangelogError::Unpersisted {
            source: Box::new(source),
            persist: into_state_error(persist),
        }),
    }
}

fn into_state_error(error: ChangelogError) -> StateError {
    match error {
        ChangelogError::State(e) => e,
        other => StateError::SaveFailed {
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::ReleaseCategory;
    use crate::state::{PullRequest, PullRequests};

    #[test]
    fn test_all_prs_returns_node_ids() {
        let mut state = ResolutionState::default();
        state.pull_requests.insert(
            3,
            PullRequest {
                release_label: ReleaseCategory::Bug,
                ..PullRequest::default()
            },
        );
        state
            .backport_prs
            .insert(1, PullRequests::from([(2, PullRequest::default())]));
        state.node_ids.insert(3, "PR_3".to_string());

        let changelog = Changelog::new(state, RenderOptions::default());
        let (prs, node_ids) = changelog.all_prs();
        assert_eq!(prs, BTreeSet::from([1, 2, 3]));
        assert_eq!(node_ids.get(&3).map(String::as_str), Some("PR_3"));
    }

    #[test]
    fn test_non_state_errors_become_save_failures() {
        let err = into_state_error(ChangelogError::Cancelled);
        assert!(matches!(err, StateError::SaveFailed { .. }));
    }
}
