//! Status command implementation.
//!
//! Summarises the checkpoint of a previous or interrupted run.

use crate::changelog::ReleaseCategory;
use crate::cli::{Command, RuntimeConfig};
use crate::error::Result;
use crate::state::{ResolutionState, StateManager};
use std::collections::BTreeMap;

/// Execute status command
pub(super) fn execute_status(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let Command::Status {
        state_file,
        json,
        detailed,
    } = command
    else {
        unreachable!("execute_status called with non-Status command");
    };

    let manager = StateManager::new(state_file);
    if !manager.state_exists() {
        if *json {
            config.output().stdout("{\"status\": \"no_checkpoint\"}\n")?;
        } else {
            config.println(&format!("No checkpoint found at {}", state_file.display()));
        }
        return Ok(());
    }

    let load_result = manager.load_state()?;
    let state = load_result.state;

    if *json {
        let json_output = serde_json::to_string_pretty(&state)?;
        config.output().stdout(&format!("{}\n", json_output))?;
        return Ok(());
    }

    config.println(&format!("📊 {}", state.summary()));
    if let Some(saved_at) = state.saved_at {
        config.println(&format!("Saved: {}", saved_at.to_rfc3339()));
    }

    if *detailed {
        config.println(&format!(
            "Checkpoint: {} ({} bytes)",
            state_file.display(),
            load_result.file_size_bytes
        ));

        config.println("\nEntries by category:");
        for (category, count) in category_counts(&state) {
            config.indent(&format!("{}: {}", category, count));
        }

        if !state.commits.is_empty() {
            config.println("\nPending commits:");
            for commit in &state.commits {
                config.indent(commit);
            }
        }
    }

    Ok(())
}

/// Standalone and upstream entries per category, in render order
fn category_counts(state: &ResolutionState) -> BTreeMap<ReleaseCategory, usize> {
    let mut counts = BTreeMap::new();
    let upstreams = state.backport_prs.values().flat_map(|links| links.values());
    for pr in state.pull_requests.values().chain(upstreams) {
        *counts.entry(pr.release_label).or_insert(0) += 1;
    }
    counts
}
