//! Release-note categories.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every release-note label
pub const RELEASE_NOTE_PREFIX: &str = "release-note/";

/// Category a PR's release note is grouped under
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ReleaseCategory {
    /// Security fixes
    #[serde(rename = "release-note/security")]
    Security,
    /// Major changes
    #[serde(rename = "release-note/major")]
    Major,
    /// Minor changes
    #[serde(rename = "release-note/minor")]
    Minor,
    /// Bug fixes
    #[serde(rename = "release-note/bug")]
    Bug,
    /// CI changes
    #[serde(rename = "release-note/ci")]
    Ci,
    /// Miscellaneous changes
    #[serde(rename = "release-note/misc")]
    Misc,
    /// No category label
    #[default]
    #[serde(rename = "release-note/none")]
    None,
}

impl ReleaseCategory {
    /// Render order, highest priority first
    pub const ORDER: [ReleaseCategory; 7] = [
        ReleaseCategory::Security,
        ReleaseCategory::Major,
        ReleaseCategory::Minor,
        ReleaseCategory::Bug,
        ReleaseCategory::Ci,
        ReleaseCategory::Misc,
        ReleaseCategory::None,
    ];

    /// Suffix after `release-note/`
    pub fn slug(self) -> &'static str {
        match self {
            ReleaseCategory::Security => "security",
            ReleaseCategory::Major => "major",
            ReleaseCategory::Minor => "minor",
            ReleaseCategory::Bug => "bug",
            ReleaseCategory::Ci => "ci",
            ReleaseCategory::Misc => "misc",
            ReleaseCategory::None => "none",
        }
    }

    /// Section header in the rendered changelog
    pub fn header(self) -> &'static str {
        match self {
            ReleaseCategory::Security => "**Important Security Updates:**",
            ReleaseCategory::Major => "**Major Changes:**",
            ReleaseCategory::Minor => "**Minor Changes:**",
            ReleaseCategory::Bug => "**Bugfixes:**",
            ReleaseCategory::Ci => "**CI Changes:**",
            ReleaseCategory::Misc => "**Misc Changes:**",
            ReleaseCategory::None => "**Other Changes:**",
        }
    }

    /// Category for a PR label, if the label names a known one
    pub fn from_label(label: &str) -> Option<Self> {
        let slug = label.strip_prefix(RELEASE_NOTE_PREFIX)?;
        Self::ORDER.into_iter().find(|c| c.slug() == slug)
    }

    /// Categories to render: `allow` filtered into the default order, or all of them
    pub fn render_order(allow: &[ReleaseCategory]) -> Vec<ReleaseCategory> {
        Self::ORDER
            .into_iter()
            .filter(|c| allow.is_empty() || allow.contains(c))
            .collect()
    }
}

impl fmt::Display for ReleaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", RELEASE_NOTE_PREFIX, self.slug())
    }
}

impl FromStr for ReleaseCategory {
    type Err = ConfigError;

    /// Accepts `release-note/bug` as well as the bare `bug`
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let slug = value.strip_prefix(RELEASE_NOTE_PREFIX).unwrap_or(value);
        Self::ORDER
            .into_iter()
            .find(|c| c.slug() == slug)
            .ok_or_else(|| ConfigError::InvalidReleaseLabel {
                value: value.to_string(),
            })
    }
}
