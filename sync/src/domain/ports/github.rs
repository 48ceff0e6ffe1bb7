//! GitHub client port trait

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::IssueFilter;
use crate::error::GitHubError;

/// Trait for the GitHub REST calls the sync makes
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// List every issue of a repository, following pagination to the end.
    /// Items are returned as raw JSON so the caller decides how to read them.
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: IssueFilter,
    ) -> Result<Vec<Value>, GitHubError>;
}
