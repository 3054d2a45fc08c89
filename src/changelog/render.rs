//! Text rendering of a resolved changelog.

use super::category::ReleaseCategory;
use super::notes::{BACKPORT_DONE_PREFIX, matches_label_filter};
use crate::config::RenderOptions;
use crate::state::{PullRequest, ResolutionState};

const SUMMARY_HEADER: &str = "Summary of Changes";
const SUMMARY_RULE: &str = "------------------";

/// Rendered changelog and what was left out of it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedChangelog {
    /// Changelog text
    pub body: String,
    /// Entries suppressed by the last-stable rule, grouped by category
    pub notice: Option<String>,
    /// Standalone PRs left after label filtering
    pub standalone_count: usize,
    /// Backport PRs with at least one upstream left after label filtering
    pub backport_count: usize,
}

/// One changelog line before sorting
struct Entry<'a> {
    category: ReleaseCategory,
    line: String,
    pr: &'a PullRequest,
}

fn entry_line(
    pr: &PullRequest,
    number: u64,
    upstream: Option<u64>,
    options: &RenderOptions,
) -> String {
    let mut text = format!("* {}", pr.release_note);
    if !options.exclude_pr_references {
        let reference = match upstream {
            Some(upstream) => format!(
                " (Backport PR #{number}, Upstream PR #{upstream}, @{})",
                pr.author_name
            ),
            None => format!(" (#{number}, @{})", pr.author_name),
        };
        text.push_str(&reference);
    }
    text
}

/// Last stable branch, with a blank value meaning no suppression
fn stable_branch(options: &RenderOptions) -> Option<&str> {
    options
        .last_stable
        .as_deref()
        .map(str::trim)
        .filter(|stable| !stable.is_empty())
}

/// Whether a standalone PR was already backported to the last stable branch
fn already_released(pr: &PullRequest, last_stable: Option<&str>) -> bool {
    last_stable.is_some_and(|stable| {
        let done = format!("{BACKPORT_DONE_PREFIX}{stable}");
        pr.backport_branches.iter().any(|branch| *branch == done)
    })
}

/// Lines of `category`, sorted case-insensitively
fn sorted_lines(entries: &[Entry<'_>], category: ReleaseCategory) -> Vec<String> {
    let mut lines: Vec<String> = entries
        .iter()
        .filter(|e| e.category == category)
        .map(|e| e.line.clone())
        .collect();
    lines.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    lines
}

fn write_sections(out: &mut String, entries: &[Entry<'_>], order: &[ReleaseCategory]) {
    for &category in order {
        let lines = sorted_lines(entries, category);
        if lines.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(category.header());
        out.push('\n');
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
}

/// Render `state` as a changelog.
///
/// Label filters, the category allow-list and last-stable suppression are all
/// applied here; `state` itself is never modified.
pub fn render(state: &ResolutionState, options: &RenderOptions) -> RenderedChangelog {
    let order = ReleaseCategory::render_order(&options.release_labels);
    let last_stable = stable_branch(options);

    let mut listed = Vec::new();
    let mut suppressed = Vec::new();
    let mut backports = 0;

    for (&backport, upstreams) in &state.backport_prs {
        let before = listed.len();
        for (&upstream, pr) in upstreams {
            if !matches_label_filter(&pr.labels, &options.label_filters) {
                continue;
            }
            listed.push(Entry {
                category: pr.release_label,
                line: entry_line(pr, backport, Some(upstream), options),
                pr,
            });
        }
        if listed.len() > before {
            backports += 1;
        }
    }

    let mut standalone = 0;
    for (&number, pr) in &state.pull_requests {
        if !matches_label_filter(&pr.labels, &options.label_filters) {
            continue;
        }
        standalone += 1;
        let entry = Entry {
            category: pr.release_label,
            line: entry_line(pr, number, None, options),
            pr,
        };
        if already_released(entry.pr, last_stable) && order.contains(&entry.category) {
            suppressed.push(entry);
        } else {
            listed.push(entry);
        }
    }

    log::info!(
        "Found {} PRs and {} backport PRs based on the label filter",
        standalone,
        backports
    );

    let mut body = String::new();
    if !options.skip_header {
        body.push_str(SUMMARY_HEADER);
        body.push('\n');
        body.push_str(SUMMARY_RULE);
        body.push('\n');
    }
    write_sections(&mut body, &listed, &order);

    let notice = (!suppressed.is_empty()).then(|| {
        let mut notice = format!(
            "NOTICE: The following PRs were not included in the changelog as they were \
             backported to branch {} and assumed to be already released.\n",
            last_stable.unwrap_or_default()
        );
        write_sections(&mut notice, &suppressed, &order);
        notice
    });

    RenderedChangelog {
        body,
        notice,
        standalone_count: standalone,
        backport_count: backports,
    }
}
