//! Generate command implementation.
//!
//! Resolves the commit range, checkpoints progress and prints the changelog.

use crate::changelog::{RenderedChangelog, generate};
use crate::cli::{Command, RuntimeConfig};
use crate::error::Result;
use crate::github::GitHubClient;
use std::path::Path;
use tokio_util::sync::CancellationToken;

use super::helpers::spawn_interrupt_handler;

/// Execute generate command
pub(super) async fn execute_generate(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let Command::Generate { output, .. } = command else {
        unreachable!("execute_generate called with non-Generate command");
    };

    let changelog_config = command.changelog_config()?;
    config.verbose_println(&format!(
        "Resolving {}...{} in {}",
        changelog_config.base, changelog_config.head, changelog_config.repo
    ));

    let client = GitHubClient::new(changelog_config.repo.clone(), &changelog_config.api)?;
    let cancel = CancellationToken::new();
    let interrupt = spawn_interrupt_handler(cancel.clone());

    let result = generate(&client, &changelog_config, cancel).await;
    interrupt.abort();
    let (changelog, report) = result?;

    // Each warning was already logged when it was met
    if !report.warnings.is_empty() {
        config.warning_println(&format!(
            "{} warning(s) during resolution",
            report.warnings.len()
        ));
        for warning in &report.warnings {
            config.indent(&warning.to_string());
        }
    }
    config.verbose_println(&format!(
        "Resolved {} commits; state stored in {}",
        report.resolved_commits,
        changelog_config.state_file.display()
    ));

    let rendered = changelog.render();
    write_changelog(&rendered, output.as_deref(), config)?;
    print_notice(&rendered, config);

    config.success_println(&format!(
        "Found {} PRs and {} backport PRs",
        rendered.standalone_count, rendered.backport_count
    ));
    Ok(())
}

fn write_changelog(
    rendered: &RenderedChangelog,
    output: Option<&Path>,
    config: &RuntimeConfig,
) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, &rendered.body)?;
            config.success_println(&format!("Changelog written to {}", path.display()));
        }
        None => config.output().stdout(&rendered.body)?,
    }
    Ok(())
}

fn print_notice(rendered: &RenderedChangelog, config: &RuntimeConfig) {
    let Some(notice) = &rendered.notice else {
        return;
    };
    let mut lines = notice.lines();
    if let Some(first) = lines.next() {
        config.warning_println(first);
    }
    for line in lines {
        config.println(line);
    }
}
