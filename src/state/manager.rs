//! Checkpoint persistence for resolution state.
//!
//! Saves go to a temporary sibling first and are renamed over the checkpoint,
//! so a reader never sees a half-written file. One writer per checkpoint is
//! assumed; there is no locking.

use crate::error::{Result, StateError};
use crate::state::ResolutionState;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// State manager for one checkpoint file
#[derive(Debug, Clone)]
pub struct StateManager {
    /// Path to state file
    state_file_path: PathBuf,
}

/// Result of state loading operation
#[derive(Debug)]
pub struct LoadStateResult {
    /// Loaded resolution state
    pub state: ResolutionState,
    /// Size of the checkpoint in bytes
    pub file_size_bytes: u64,
}

/// Result of state saving operation
#[derive(Debug)]
pub struct SaveStateResult {
    /// Size of saved state file in bytes
    pub file_size_bytes: u64,
    /// Duration of save operation
    pub save_duration: Duration,
}

impl StateManager {
    /// Create a new state manager
    pub fn new<P: AsRef<Path>>(state_file_path: P) -> Self {
        Self {
            state_file_path: state_file_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the checkpoint
    pub fn path(&self) -> &Path {
        &self.state_file_path
    }

    /// Check if state file exists
    pub fn state_exists(&self) -> bool {
        self.state_file_path.exists()
    }

    /// Save state, overwriting any previous checkpoint.
    ///
    /// Stamps `saved_at` on `state` before writing.
    pub fn save_state(&self, state: &mut ResolutionState) -> Result<SaveStateResult> {
        let start_time = SystemTime::now();
        state.saved_at = Some(chrono::Utc::now());

        let serialized =
            serde_json::to_string_pretty(state).map_err(|e| StateError::SaveFailed {
                reason: format!("Failed to serialize state: {}", e),
            })?;

        let temp_file_path = self.state_file_path.with_extension("tmp");
        {
            let mut file =
                fs::File::create(&temp_file_path).map_err(|e| StateError::SaveFailed {
                    reason: format!("Failed to create temp file: {}", e),
                })?;

            file.write_all(serialized.as_bytes())
                .map_err(|e| StateError::SaveFailed {
                    reason: format!("Failed to write state: {}", e),
                })?;

            file.sync_all().map_err(|e| StateError::SaveFailed {
                reason: format!("Failed to sync file: {}", e),
            })?;
        }

        fs::rename(&temp_file_path, &self.state_file_path).map_err(|e| StateError::SaveFailed {
            reason: format!("Failed to rename temp file: {}", e),
        })?;

        let file_size_bytes = fs::metadata(&self.state_file_path)
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(SaveStateResult {
            file_size_bytes,
            save_duration: start_time.elapsed().unwrap_or_default(),
        })
    }

    /// Load state from the checkpoint
    pub fn load_state(&self) -> Result<LoadStateResult> {
        if !self.state_exists() {
            return Err(StateError::NotFound {
                path: self.state_file_path.clone(),
            }
            .into());
        }

        let contents =
            fs::read_to_string(&self.state_file_path).map_err(|e| StateError::LoadFailed {
                reason: format!(
                    "Failed to read file {}: {}",
                    self.state_file_path.display(),
                    e
                ),
            })?;

        let state: ResolutionState =
            serde_json::from_str(&contents).map_err(|e| StateError::Corrupted {
                reason: format!("Failed to deserialize state: {}", e),
            })?;

        state.validate()?;

        Ok(LoadStateResult {
            state,
            file_size_bytes: contents.len() as u64,
        })
    }

    /// Delete the checkpoint and any leftover temporary file
    pub fn cleanup_state(&self) -> Result<()> {
        let mut errors = Vec::new();

        for path in [
            self.state_file_path.clone(),
            self.state_file_path.with_extension("tmp"),
        ] {
            if path.exists()
                && let Err(e) = fs::remove_file(&path)
            {
                errors.push(format!("Failed to remove {}: {}", path.display(), e));
            }
        }

        if !errors.is_empty() {
            return Err(StateError::SaveFailed {
                reason: format!("Cleanup errors: {}", errors.join("; ")),
            }
            .into());
        }

        Ok(())
    }
}

impl SaveStateResult {
    /// Format save result for display
    pub fn format_result(&self) -> String {
        format!(
            "State saved: {} bytes in {:.2}s",
            self.file_size_bytes,
            self.save_duration.as_secs_f64()
        )
    }
}
