//! Notion adapter for RecordSink
//!
//! Every issue is one page of the configured database, matched on the
//! numeric `ID` property.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::properties::{database_schema, id_filter};
use crate::domain::entities::IssueRecord;
use crate::domain::ports::{NotionClient, PageProperties, RecordHandle, RecordSink};
use crate::error::SyncError;

/// Notion implementation of RecordSink
pub struct NotionRecordSink {
    notion: Arc<dyn NotionClient>,
    database_id: String,
    /// Fixed pause after writes; Notion allows ~3 requests per second
    write_delay: Duration,
}

impl NotionRecordSink {
    pub fn new(notion: Arc<dyn NotionClient>, database_id: String, write_delay: Duration) -> Self {
        tracing::info!(database_id = %database_id, "Notion sink initialized");
        Self {
            notion,
            database_id,
            write_delay,
        }
    }

    async fn pause(&self) {
        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }
    }
}

#[async_trait]
impl RecordSink for NotionRecordSink {
    async fn create(&self, issue: &IssueRecord) -> Result<(), SyncError> {
        let id = issue.id();
        tracing::info!(issue_id = id, database_id = %self.database_id, "Creating page for issue");

        // Fail fast when the integration cannot see the database
        let database = self
            .notion
            .retrieve_database(&self.database_id)
            .await
            .map_err(|e| {
                tracing::error!(issue_id = id, database_id = %self.database_id, error = %e, "Database not accessible");
                SyncError::Access(e)
            })?;
        tracing::debug!(database_id = %database.id, "Database access confirmed");

        let page = self
            .notion
            .create_page(&self.database_id, &PageProperties::from(issue))
            .await
            .map_err(|e| {
                tracing::error!(issue_id = id, error = %e, "Failed to create page");
                SyncError::Create { id, source: e }
            })?;
        tracing::info!(issue_id = id, page_id = %page.id, "Successfully created page");

        self.pause().await;
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Option<RecordHandle>, SyncError> {
        tracing::debug!(issue_id = id, database_id = %self.database_id, "Searching for existing page");

        let pages = self
            .notion
            .query_database(&self.database_id, id_filter(id))
            .await
            .map_err(|e| {
                tracing::error!(issue_id = id, error = %e, "Failed to query database");
                SyncError::Query { id, source: e }
            })?;

        if pages.len() > 1 {
            tracing::warn!(
                issue_id = id,
                count = pages.len(),
                "Several pages share this issue ID, using the first"
            );
        }

        let Some(page) = pages.into_iter().next() else {
            tracing::debug!(issue_id = id, "No page found");
            return Ok(None);
        };

        if let Some(existing) = page.mirrored_properties() {
            let existing = IssueRecord::from(&existing);
            tracing::debug!(
                issue_id = id,
                page_id = %page.id,
                state = %existing.state(),
                title = existing.title(),
                "Found existing page"
            );
        }

        Ok(Some(RecordHandle { page_id: page.id }))
    }

    async fn update(&self, id: i64, issue: &IssueRecord) -> Result<(), SyncError> {
        tracing::info!(issue_id = id, "Finding page to update");
        let handle = self.find(id).await?;
        self.pause().await;

        let Some(handle) = handle else {
            tracing::warn!(issue_id = id, "Could not find page for issue, nothing updated");
            return Ok(());
        };

        tracing::info!(issue_id = id, page_id = %handle.page_id, "Found page, updating it");
        self.notion
            .update_page(&handle.page_id, &PageProperties::from(issue))
            .await
            .map_err(|e| {
                tracing::error!(issue_id = id, page_id = %handle.page_id, error = %e, "Failed to update page");
                SyncError::Update { id, source: e }
            })?;
        tracing::info!(issue_id = id, page_id = %handle.page_id, "Page updated successfully");

        self.pause().await;
        Ok(())
    }

    async fn provision_schema(&self) -> Result<(), SyncError> {
        tracing::info!(database_id = %self.database_id, "Setting up database properties");

        self.notion
            .update_database(&self.database_id, database_schema())
            .await
            .map_err(|e| {
                tracing::error!(database_id = %self.database_id, error = %e, "Failed to setup database");
                SyncError::Schema(e)
            })?;

        tracing::info!(database_id = %self.database_id, "Successfully set up database");
        Ok(())
    }
}
