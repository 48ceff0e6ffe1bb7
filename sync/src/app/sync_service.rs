//! Sync service
//!
//! Decides what a run does from its trigger and drives the source and
//! the sink. Everything is sequential: one call, one issue at a time.

use std::sync::Arc;

use crate::domain::entities::{DispatchFlags, EventKind, IssueRecord};
use crate::domain::ports::{IssueSource, RecordSink};
use crate::error::SyncError;

/// Outcome of a full sync, for logging. Failures inside the pass are
/// counted here and never fail the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Service mirroring issues from a source into a sink
pub struct SyncService<S, R>
where
    S: IssueSource,
    R: RecordSink,
{
    source: Arc<S>,
    sink: Arc<R>,
}

impl<S, R> SyncService<S, R>
where
    S: IssueSource,
    R: RecordSink,
{
    pub fn new(source: Arc<S>, sink: Arc<R>) -> Self {
        Self { source, sink }
    }

    /// Handle one run for the given trigger
    pub async fn run(&self, event: &EventKind, flags: DispatchFlags) -> Result<(), SyncError> {
        match event {
            EventKind::Issues => self.handle_issue_event().await,
            EventKind::WorkflowDispatch => self.handle_dispatch(flags).await,
            EventKind::Other(name) => {
                tracing::info!(event = %name, "Event is not handled, nothing to do");
                Ok(())
            }
        }
    }

    /// `opened` creates a record, every other action updates it.
    ///
    /// No lookup happens before create: a redelivered `opened` event
    /// creates a second record.
    pub async fn handle_issue_event(&self) -> Result<(), SyncError> {
        let action = self.source.current_event_action();
        let issue = self.source.current_event_issue();
        tracing::info!(action = %action, issue_id = issue.id(), "Handling issue event");

        if action == "opened" {
            self.sink.create(&issue).await
        } else {
            self.sink.update(issue.id(), &issue).await
        }
    }

    /// Setup first, then sync; either, both or neither may be requested
    pub async fn handle_dispatch(&self, flags: DispatchFlags) -> Result<(), SyncError> {
        if flags.setup {
            self.setup_database().await?;
        }

        if flags.sync_issues {
            self.sync_issues().await?;
        }

        if !flags.setup && !flags.sync_issues {
            tracing::info!("Dispatch requested neither setup nor syncIssues");
        }
        Ok(())
    }

    pub async fn setup_database(&self) -> Result<(), SyncError> {
        tracing::info!("Setting up database");
        self.sink.provision_schema().await
    }

    /// Full sync pass: every fetched issue is created or updated in turn.
    ///
    /// Only the fetch can fail the pass. A failed lookup counts as "not
    /// found", and a failed write is logged before moving on.
    pub async fn sync_issues(&self) -> Result<SyncSummary, SyncError> {
        tracing::info!("Fetching all issues");
        let issues = self.source.fetch_all().await?;
        let total = issues.len();
        tracing::info!("Starting to process {} issues", total);

        let mut summary = SyncSummary::default();
        for (i, issue) in issues.iter().enumerate() {
            tracing::info!(
                "Processing issue {}/{}: #{} - {}",
                i + 1,
                total,
                issue.id(),
                issue.title()
            );
            summary.processed += 1;

            match self.sync_one(issue).await {
                Ok(SyncAction::Created) => summary.created += 1,
                Ok(SyncAction::Updated) => summary.updated += 1,
                Err(e) => {
                    tracing::error!(issue_id = issue.id(), error = %e, "Failed to process issue");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            processed = summary.processed,
            created = summary.created,
            updated = summary.updated,
            failed = summary.failed,
            "Finished processing {} issues",
            total
        );
        Ok(summary)
    }

    async fn sync_one(&self, issue: &IssueRecord) -> Result<SyncAction, SyncError> {
        let existing = match self.sink.find(issue.id()).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(issue_id = issue.id(), error = %e, "Lookup failed, treating issue as new");
                None
            }
        };

        match existing {
            Some(handle) => {
                tracing::info!(issue_id = issue.id(), page_id = %handle.page_id, "Updating existing page");
                self.sink.update(issue.id(), issue).await?;
                Ok(SyncAction::Updated)
            }
            None => {
                tracing::info!(issue_id = issue.id(), "Creating new page");
                self.sink.create(issue).await?;
                Ok(SyncAction::Created)
            }
        }
    }
}

enum SyncAction {
    Created,
    Updated,
}
