//! Wire models for the subset of the GitHub REST API the engine reads.

use serde::Deserialize;

/// Opaque commit identifier (full SHA)
pub type CommitId = String;

/// One compare call's worth of commits, ordered base to head
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitWindow {
    /// Commit SHAs, oldest first
    pub commits: Vec<CommitId>,
    /// Size of the full range as reported by the API
    pub total_commits: Option<u64>,
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Page number to request next, `None` on the last page
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    /// A page with no successor
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page: None,
        }
    }
}

/// Issue or pull request label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,
}

/// Account reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Login handle
    pub login: String,
}

/// Pull request as returned by the pulls endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestPayload {
    /// PR number
    pub number: u64,
    /// "open" or "closed"
    pub state: String,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Description, absent when empty
    #[serde(default)]
    pub body: Option<String>,
    /// Labels
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Author
    #[serde(default)]
    pub user: Option<User>,
    /// GraphQL node id
    #[serde(default)]
    pub node_id: String,
}

impl PullRequestPayload {
    /// Closed PRs are release-final; open ones are not
    pub fn is_closed(&self) -> bool {
        self.state == "closed"
    }

    /// Description text, empty when absent
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Author login, empty when unknown
    pub fn author(&self) -> &str {
        self.user.as_ref().map(|u| u.login.as_str()).unwrap_or_default()
    }

    /// Label names in API order
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

/// Search hit from `/search/issues`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueSummary {
    /// Issue or PR number
    pub number: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// "open" or "closed"
    #[serde(default)]
    pub state: String,
    /// GraphQL node id
    #[serde(default)]
    pub node_id: String,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
    /// Labels
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Present only when the hit is a pull request
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl IssueSummary {
    /// Whether the hit is a pull request rather than an issue
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}
