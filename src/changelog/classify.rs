//! Standalone vs backport classification of a pull request.

use super::notes;
use crate::github::PullRequestPayload;
use crate::state::PullRequest;

/// What a closed pull request turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrClass {
    /// An ordinary PR, recorded with its own release note
    Standalone(PullRequest),
    /// A backport of the listed upstream PRs
    Backport(Vec<u64>),
}

/// Classify `payload` by the presence of an `upstream-prs` block
pub fn classify(payload: &PullRequestPayload) -> PrClass {
    match notes::upstream_prs(payload.body()) {
        Some(upstreams) => PrClass::Backport(upstreams),
        None => PrClass::Standalone(standalone_entry(payload)),
    }
}

/// Release data of a standalone PR, including its `backport-done/` labels
pub fn standalone_entry(payload: &PullRequestPayload) -> PullRequest {
    let labels = payload.label_names();
    PullRequest {
        backport_branches: notes::backport_branches(&labels),
        ..upstream_entry(payload)
    }
}

/// Release data of an upstream PR linked from a backport
pub fn upstream_entry(payload: &PullRequestPayload) -> PullRequest {
    let labels = payload.label_names();
    PullRequest {
        release_note: notes::release_note(&payload.title, payload.body()),
        release_label: notes::release_category(&labels),
        author_name: payload.author().to_string(),
        labels,
        backport_branches: Vec::new(),
    }
}
