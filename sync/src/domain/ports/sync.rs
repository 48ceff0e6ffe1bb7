//! Source and sink ports used by the sync service

use async_trait::async_trait;

use crate::domain::entities::IssueRecord;
use crate::error::SyncError;

/// Where issues come from
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Action of the triggering event (`opened`, `closed`, ...), `""` if none
    fn current_event_action(&self) -> String;

    /// Issue carried by the triggering event, empty-valued if none
    fn current_event_issue(&self) -> IssueRecord;

    /// Every issue matching the configured state filter, in listing order
    async fn fetch_all(&self) -> Result<Vec<IssueRecord>, SyncError>;
}

/// Handle to an existing database record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHandle {
    pub page_id: String,
}

/// Where issues are mirrored to
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn create(&self, issue: &IssueRecord) -> Result<(), SyncError>;

    async fn find(&self, id: i64) -> Result<Option<RecordHandle>, SyncError>;

    /// Overwrite the record for `id`. A missing record is not an error:
    /// it is logged and nothing is written.
    async fn update(&self, id: i64, issue: &IssueRecord) -> Result<(), SyncError>;

    async fn provision_schema(&self) -> Result<(), SyncError>;
}
