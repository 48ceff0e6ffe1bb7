//! GitHub adapter for IssueSource
//!
//! Issues live in GitHub - single issues come from the triggering event,
//! full listings from the REST API.

use async_trait::async_trait;
use std::sync::Arc;

use super::event::GitHubEvent;
use crate::config::RepoRef;
use crate::domain::entities::{IssueFilter, IssueRecord};
use crate::domain::ports::{GitHubClient, IssueSource};
use crate::error::{GitHubError, SyncError};

/// GitHub implementation of IssueSource
pub struct GitHubIssueSource {
    github: Arc<dyn GitHubClient>,
    event: GitHubEvent,
    repository: Option<RepoRef>,
    filter: IssueFilter,
}

impl GitHubIssueSource {
    pub fn new(
        github: Arc<dyn GitHubClient>,
        event: GitHubEvent,
        repository: Option<RepoRef>,
        filter: IssueFilter,
    ) -> Self {
        Self {
            github,
            event,
            repository,
            filter,
        }
    }

    async fn list(&self) -> Result<Vec<IssueRecord>, GitHubError> {
        let repo = self
            .repository
            .as_ref()
            .ok_or(GitHubError::MissingRepository)?;
        tracing::info!(
            "Fetching {} issues from: {}/{}",
            self.filter.as_query(),
            repo.owner,
            repo.repo
        );

        let raw = self
            .github
            .list_issues(&repo.owner, &repo.repo, self.filter)
            .await?;

        Ok(raw.into_iter().map(IssueRecord::from).collect())
    }
}

#[async_trait]
impl IssueSource for GitHubIssueSource {
    fn current_event_action(&self) -> String {
        self.event.action()
    }

    fn current_event_issue(&self) -> IssueRecord {
        self.event.issue()
    }

    async fn fetch_all(&self) -> Result<Vec<IssueRecord>, SyncError> {
        match self.list().await {
            Ok(issues) => {
                tracing::info!("Successfully fetched {} issues to sync", issues.len());
                Ok(issues)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch issues from GitHub");
                tracing::debug!(error = ?e, "Fetch error details");
                Err(SyncError::Fetch(e))
            }
        }
    }
}
