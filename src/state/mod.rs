//! Checkpointing for commit-to-PR resolution.
//!
//! This module provides the persisted resolution model and its storage,
//! enabling a failed or cancelled run to resume without refetching.

mod manager;
mod resolution_state;

pub use manager::{LoadStateResult, SaveStateResult, StateManager};
pub use resolution_state::{
    BackportPrs, NodeIds, PullRequest, PullRequests, ResolutionState, STATE_FORMAT_VERSION,
};

use crate::error::Result;
use std::path::Path;

/// Write `state` to `path`, overwriting prior content
pub fn store(path: &Path, state: &mut ResolutionState) -> Result<SaveStateResult> {
    StateManager::new(path).save_state(state)
}

/// Read the state stored at `path`
pub fn load(path: &Path) -> Result<ResolutionState> {
    Ok(StateManager::new(path).load_state()?.state)
}
