//! REST implementation of [`PlatformApi`] on top of reqwest.

use super::models::{CommitWindow, IssueSummary, Page, PullRequestPayload};
use super::pagination::next_page_from_link;
use super::PlatformApi;
use async_trait::async_trait;
use crate::config::{ApiConfig, RepoName};
use crate::error::GitHubError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const API_VERSION: &str = "2022-11-28";

/// GitHub REST client scoped to one repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
    repo: RepoName,
}

#[derive(Deserialize)]
struct CompareResponse {
    #[serde(default)]
    total_commits: Option<u64>,
    #[serde(default)]
    commits: Vec<CompareCommit>,
}

#[derive(Deserialize)]
struct CompareCommit {
    sha: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<IssueSummary>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GitHubClient {
    /// Create a client for `repo`
    pub fn new(repo: RepoName, config: &ApiConfig) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("kodegen_release_notes/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                GitHubError::Decode {
                    operation: "authorization header".to_string(),
                    reason: e.to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        // A trailing slash keeps `join` from dropping the last path segment
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');

        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            repo,
        })
    }

    /// Build `{base}/repos/{owner}/{repo}/{segments...}`
    fn repo_url(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| GitHubError::Decode {
                operation: "url".to_string(),
                reason: format!("{} cannot be a base URL", self.base_url),
            })?;
            path.pop_if_empty();
            path.push("repos");
            path.push(&self.repo.owner);
            path.push(&self.repo.repo);
            path.extend(segments);
        }
        Ok(url)
    }

    async fn send(&self, operation: &str, url: Url) -> Result<Response, GitHubError> {
        log::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        check_status(operation, response).await
    }

    async fn decode<T: DeserializeOwned>(
        operation: &str,
        response: Response,
    ) -> Result<T, GitHubError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GitHubError::Decode {
            operation: operation.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Map non-success statuses onto [`GitHubError`]
async fn check_status(operation: &str, response: Response) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let headers = response.headers().clone();
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|b| b.message)
        .unwrap_or_default();

    Err(classify_status(operation, status, &headers, message))
}

fn classify_status(
    operation: &str,
    status: StatusCode,
    headers: &HeaderMap,
    message: String,
) -> GitHubError {
    let header_u64 = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
    };

    let exhausted = header_u64("x-ratelimit-remaining") == Some(0);
    match status {
        StatusCode::NOT_FOUND => GitHubError::NotFound {
            resource: operation.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimited {
            reset_at: header_u64("x-ratelimit-reset"),
        },
        StatusCode::FORBIDDEN if exhausted => GitHubError::RateLimited {
            reset_at: header_u64("x-ratelimit-reset"),
        },
        _ => GitHubError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
            message,
        },
    }
}

fn next_page(response: &Response) -> Option<u32> {
    response
        .headers()
        .get(LINK)
        .and_then(|v| v.to_str().ok())
        .and_then(next_page_from_link)
}

#[async_trait]
impl PlatformApi for GitHubClient {
    async fn compare_commits(&self, base: &str, head: &str) -> Result<CommitWindow, GitHubError> {
        let operation = format!("compare {base}...{head}");
        let range = format!("{base}...{head}");
        let url = self.repo_url(&["compare", &range])?;
        let response = self.send(&operation, url).await?;
        let body: CompareResponse = Self::decode(&operation, response).await?;

        Ok(CommitWindow {
            commits: body.commits.into_iter().map(|c| c.sha).collect(),
            total_commits: body.total_commits,
        })
    }

    async fn pull_requests_for_commit(
        &self,
        sha: &str,
        page: u32,
    ) -> Result<Page<PullRequestPayload>, GitHubError> {
        let operation = format!("list pull requests for commit {sha}");
        let mut url = self.repo_url(&["commits", sha, "pulls"])?;
        url.query_pairs_mut().append_pair("page", &page.max(1).to_string());
        let response = self.send(&operation, url).await?;
        let next_page = next_page(&response);
        let items = Self::decode(&operation, response).await?;

        Ok(Page { items, next_page })
    }

    async fn pull_request(&self, number: u64) -> Result<PullRequestPayload, GitHubError> {
        let operation = format!("pull request #{number}");
        let url = self.repo_url(&["pulls", &number.to_string()])?;
        let response = self.send(&operation, url).await?;
        Self::decode(&operation, response).await
    }

    async fn search_issues(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Page<IssueSummary>, GitHubError> {
        let operation = format!("search issues '{query}'");
        let mut url = self.base_url.join("search/issues")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("per_page", "100")
            .append_pair("page", &page.max(1).to_string());
        let response = self.send(&operation, url).await?;
        let next_page = next_page(&response);
        let body: SearchResponse = Self::decode(&operation, response).await?;

        Ok(Page {
            items: body.items,
            next_page,
        })
    }
}
