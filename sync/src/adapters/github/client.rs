//! GitHub REST client implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use urlencoding::encode;

use crate::domain::entities::IssueFilter;
use crate::domain::ports::GitHubClient;
use crate::error::GitHubError;

const PER_PAGE: u32 = 100;
const API_VERSION: &str = "2022-11-28";
const CLIENT_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Implementation of the GitHub API client
pub struct GitHubClientImpl {
    http: Client,
    base_url: String,
    token: String,
}

impl GitHubClientImpl {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_page(&self, url: &str) -> Result<(Vec<Value>, Option<String>), GitHubError> {
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(USER_AGENT, CLIENT_AGENT)
            .send()
            .await?;

        let next = next_page_url(resp.headers());
        let items = self.handle_response(resp).await?;
        Ok((items, next))
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GitHubError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| GitHubError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(GitHubError::Unauthorized)
        } else if status.as_u16() == 429 || rate_limit_exhausted(response.headers()) {
            Err(GitHubError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// GitHub answers 403 (not 429) once the primary rate limit is spent
fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false)
}

fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LINK)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_next_link)
}

/// Pick the `rel="next"` target out of a `Link` header, e.g.
/// `<https://api.github.com/repositories/1/issues?page=2>; rel="next", <...>; rel="last"`
fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|p| {
            p.trim()
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
                .unwrap_or(false)
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[async_trait]
impl GitHubClient for GitHubClientImpl {
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: IssueFilter,
    ) -> Result<Vec<Value>, GitHubError> {
        let mut url = Some(self.api_url(&format!(
            "/repos/{}/{}/issues?state={}&per_page={}",
            encode(owner),
            encode(repo),
            state.as_query(),
            PER_PAGE
        )));
        let mut issues = Vec::new();

        while let Some(page_url) = url {
            let (items, next) = self.get_page(&page_url).await?;
            tracing::debug!(count = items.len(), "Fetched page of issues");
            issues.extend(items);
            url = next;
        }

        Ok(issues)
    }
}
