//! Command execution for the changelog CLI.

mod cleanup;
mod generate;
mod helpers;
mod status;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use cleanup::execute_cleanup;
use generate::execute_generate;
use status::execute_status;

/// Execute the command named by `args`, returning the process exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Generate { .. } => execute_generate(&args.command, &config).await,
        Command::Status { .. } => execute_status(&args.command, &config),
        Command::Cleanup { .. } => execute_cleanup(&args.command, &config),
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.indent(&suggestion);
                }
            }

            Ok(1)
        }
    }
}
