//! Marker blocks and labels in PR descriptions.
//!
//! A marker block is a fenced region opened by a line that is exactly
//! ```` ```release-note ```` or ```` ```upstream-prs ```` and closed by a line that
//! is exactly ```` ``` ````. Lines are trimmed and joined with single spaces.
//! A block that is never closed runs to the end of the body.

use super::category::ReleaseCategory;

const RELEASE_NOTE_BLOCK: &str = "```release-note";
const UPSTREAM_PRS_BLOCK: &str = "```upstream-prs";
const END_BLOCK: &str = "```";
const COMMENT_TAG: &str = "<!--";

/// Label prefix marking a PR as already backported to a stable branch
pub const BACKPORT_DONE_PREFIX: &str = "backport-done/";

const SHELL_LOOP: &str = "for pr in";
const LEGACY_SET_LABELS: &str = "contrib/backporting/set-labels.py";

/// Text between the first `start` line and the next closing fence.
///
/// Returns `None` when no line matches `start`.
pub fn text_block(body: &str, start: &str) -> Option<String> {
    let lines: Vec<&str> = body.lines().map(str::trim).collect();
    let begin = lines.iter().position(|line| *line == start)?;
    let content = &lines[begin + 1..];
    let end = content
        .iter()
        .position(|line| *line == END_BLOCK)
        .unwrap_or(content.len());

    Some(content[..end].join(" ").trim().to_string())
}

/// Release note of a PR: the `release-note` block, or the title when the
/// block is missing, empty or still holds the template's HTML comment.
pub fn release_note(title: &str, body: &str) -> String {
    match text_block(body, RELEASE_NOTE_BLOCK) {
        Some(block) if !block.is_empty() && !block.contains(COMMENT_TAG) => block,
        _ => title.trim().to_string(),
    }
}

/// Upstream PR numbers listed in the `upstream-prs` block.
///
/// `None` when the block is absent or empty (the PR is not a backport);
/// `Some` with a possibly empty list otherwise.
pub fn upstream_prs(body: &str) -> Option<Vec<u64>> {
    let block = text_block(body, UPSTREAM_PRS_BLOCK)?;
    if block.is_empty() {
        return None;
    }

    if block.contains(SHELL_LOOP) || block.contains(LEGACY_SET_LABELS) {
        Some(upstream_prs_shell(&block))
    } else {
        Some(parse_numbers(&block))
    }
}

/// `$ for pr in 9959 9982 10005; do contrib/backporting/set-labels.py $pr done 1.6; done`
fn upstream_prs_shell(block: &str) -> Vec<u64> {
    if !block.contains(SHELL_LOOP) {
        return Vec::new();
    }
    let block = block.strip_prefix("$ ").unwrap_or(block);
    let block = block.strip_prefix(SHELL_LOOP).unwrap_or(block);
    match block.split(';').next() {
        Some(numbers) => parse_numbers(numbers),
        None => Vec::new(),
    }
}

/// `9959 9982 10005`; tokens that are not numbers are skipped
fn parse_numbers(text: &str) -> Vec<u64> {
    text.split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// First label naming a known category, or [`ReleaseCategory::None`]
pub fn release_category(labels: &[String]) -> ReleaseCategory {
    labels
        .iter()
        .find_map(|label| ReleaseCategory::from_label(label))
        .unwrap_or_default()
}

/// Labels of the form `backport-done/<branch>`
pub fn backport_branches(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .filter(|label| label.starts_with(BACKPORT_DONE_PREFIX))
        .cloned()
        .collect()
}

/// True when `filters` is empty or shares at least one label with `labels`
pub fn matches_label_filter(labels: &[String], filters: &[String]) -> bool {
    filters.is_empty() || labels.iter().any(|label| filters.contains(label))
}
