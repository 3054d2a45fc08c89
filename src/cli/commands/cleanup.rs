//! Cleanup command implementation.
//!
//! Removes a checkpoint so the next run starts from the full range.

use crate::cli::{Command, RuntimeConfig};
use crate::error::Result;
use crate::state::StateManager;

use super::helpers::prompt_confirmation;

/// Execute cleanup command
pub(super) fn execute_cleanup(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let Command::Cleanup { state_file, yes } = command else {
        unreachable!("execute_cleanup called with non-Cleanup command");
    };

    let manager = StateManager::new(state_file);
    if !manager.state_exists() {
        config.println("No checkpoint to clean up");
        return Ok(());
    }

    if !yes {
        config.println(&format!("About to delete {}", state_file.display()));
        if !prompt_confirmation("Continue with cleanup?")? {
            config.println("Cleanup cancelled");
            return Ok(());
        }
    }

    manager.cleanup_state()?;
    config.success_println(&format!("Removed {}", state_file.display()));
    Ok(())
}
