//! Kodegen Release Notes - changelog generation from GitHub pull requests.
//!
//! This binary resolves a commit range to its pull requests, checkpointing
//! progress so interrupted runs can be resumed.

use kodegen_release_notes::cli;
use kodegen_release_notes::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    // Recoverable conditions are logged at warn level and must be visible by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
