//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and record every call so tests can verify
//! behavior.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{IssueFilter, IssueRecord};
use crate::domain::ports::{
    GitHubClient, IssueSource, NotionClient, NotionDatabase, NotionPage, PageProperties,
    RecordHandle, RecordSink,
};
use crate::error::{GitHubError, NotionError, SyncError};

fn api_error(message: &str) -> NotionError {
    NotionError::Api {
        status: 500,
        code: "internal_server_error".to_string(),
        message: message.to_string(),
    }
}

// ============================================================================
// Stub GitHub Client
// ============================================================================

pub struct StubGitHubClient {
    issues: Vec<Value>,
    fail: bool,
    calls: Arc<RwLock<Vec<(String, String, IssueFilter)>>>,
}

impl StubGitHubClient {
    pub fn with_issues(issues: Vec<Value>) -> Self {
        Self {
            issues,
            fail: false,
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_issues(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<(String, String, IssueFilter)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl GitHubClient for StubGitHubClient {
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: IssueFilter,
    ) -> Result<Vec<Value>, GitHubError> {
        self.calls
            .write()
            .unwrap()
            .push((owner.to_string(), repo.to_string(), state));

        if self.fail {
            return Err(GitHubError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }
        Ok(self.issues.clone())
    }
}

// ============================================================================
// Recording Notion Client
// ============================================================================

/// Calls received by `RecordingNotionClient`, in order
#[derive(Debug, Clone, PartialEq)]
pub enum NotionCall {
    RetrieveDatabase(String),
    Query(i64),
    CreatePage(PageProperties),
    UpdatePage(String, PageProperties),
    UpdateDatabase(Value),
}

/// In-memory database: a list of pages matched on their `ID` property
#[derive(Default)]
pub struct RecordingNotionClient {
    pages: Arc<RwLock<Vec<(String, PageProperties)>>>,
    calls: Arc<RwLock<Vec<NotionCall>>>,
    no_access: bool,
    failing_writes: bool,
    failing_schema: bool,
    failing_queries: HashSet<i64>,
}

impl RecordingNotionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a page mirroring `issue`
    pub fn with_page(self, page_id: &str, issue: &IssueRecord) -> Self {
        self.pages
            .write()
            .unwrap()
            .push((page_id.to_string(), PageProperties::from(issue)));
        self
    }

    pub fn without_database_access(mut self) -> Self {
        self.no_access = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    pub fn failing_schema(mut self) -> Self {
        self.failing_schema = true;
        self
    }

    pub fn failing_query_for(mut self, id: i64) -> Self {
        self.failing_queries.insert(id);
        self
    }

    pub fn calls(&self) -> Vec<NotionCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn create_count(&self) -> usize {
        self.count(|c| matches!(c, NotionCall::CreatePage(_)))
    }

    pub fn update_count(&self) -> usize {
        self.count(|c| matches!(c, NotionCall::UpdatePage(..)))
    }

    /// Issue ids of all stored pages, in insertion order
    pub fn issue_ids(&self) -> Vec<i64> {
        self.pages
            .read()
            .unwrap()
            .iter()
            .map(|(_, props)| IssueRecord::from(props).id())
            .collect()
    }

    /// Issue currently mirrored on a page
    pub fn issue_on(&self, page_id: &str) -> Option<IssueRecord> {
        self.pages
            .read()
            .unwrap()
            .iter()
            .find(|(id, _)| id == page_id)
            .map(|(_, props)| IssueRecord::from(props))
    }

    fn count(&self, pred: impl Fn(&NotionCall) -> bool) -> usize {
        self.calls.read().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: NotionCall) {
        self.calls.write().unwrap().push(call);
    }
}

#[async_trait]
impl NotionClient for RecordingNotionClient {
    async fn retrieve_database(&self, database_id: &str) -> Result<NotionDatabase, NotionError> {
        self.record(NotionCall::RetrieveDatabase(database_id.to_string()));

        if self.no_access {
            return Err(NotionError::Api {
                status: 404,
                code: "object_not_found".to_string(),
                message: format!("Could not find database with ID: {}.", database_id),
            });
        }
        Ok(NotionDatabase {
            id: database_id.to_string(),
        })
    }

    async fn query_database(
        &self,
        _database_id: &str,
        filter: Value,
    ) -> Result<Vec<NotionPage>, NotionError> {
        let id = filter["number"]["equals"].as_i64().unwrap_or_default();
        self.record(NotionCall::Query(id));

        if self.failing_queries.contains(&id) {
            return Err(api_error("query failed"));
        }

        Ok(self
            .pages
            .read()
            .unwrap()
            .iter()
            .filter(|(_, props)| props.id.number == Some(id))
            .map(|(page_id, props)| NotionPage {
                id: page_id.clone(),
                properties: serde_json::to_value(props).unwrap(),
            })
            .collect())
    }

    async fn create_page(
        &self,
        _database_id: &str,
        properties: &PageProperties,
    ) -> Result<NotionPage, NotionError> {
        self.record(NotionCall::CreatePage(properties.clone()));

        if self.failing_writes {
            return Err(api_error("create failed"));
        }

        let mut pages = self.pages.write().unwrap();
        let page_id = format!("created-{}", pages.len() + 1);
        pages.push((page_id.clone(), properties.clone()));
        Ok(NotionPage {
            id: page_id,
            properties: Value::Null,
        })
    }

    async fn update_page(
        &self,
        page_id: &str,
        properties: &PageProperties,
    ) -> Result<NotionPage, NotionError> {
        self.record(NotionCall::UpdatePage(
            page_id.to_string(),
            properties.clone(),
        ));

        if self.failing_writes {
            return Err(api_error("update failed"));
        }

        let mut pages = self.pages.write().unwrap();
        match pages.iter_mut().find(|(id, _)| id == page_id) {
            Some((_, props)) => {
                *props = properties.clone();
                Ok(NotionPage {
                    id: page_id.to_string(),
                    properties: Value::Null,
                })
            }
            None => Err(NotionError::Api {
                status: 404,
                code: "object_not_found".to_string(),
                message: format!("Could not find page with ID: {}.", page_id),
            }),
        }
    }

    async fn update_database(
        &self,
        database_id: &str,
        properties: Value,
    ) -> Result<NotionDatabase, NotionError> {
        self.record(NotionCall::UpdateDatabase(properties));

        if self.failing_schema {
            return Err(api_error("schema update failed"));
        }
        Ok(NotionDatabase {
            id: database_id.to_string(),
        })
    }
}

// ============================================================================
// Static Issue Source
// ============================================================================

#[derive(Default)]
pub struct StaticIssueSource {
    action: String,
    event_issue: IssueRecord,
    issues: Vec<IssueRecord>,
    fail_fetch: bool,
}

impl StaticIssueSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, action: &str, issue: IssueRecord) -> Self {
        self.action = action.to_string();
        self.event_issue = issue;
        self
    }

    pub fn with_issues(mut self, issues: Vec<IssueRecord>) -> Self {
        self.issues = issues;
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }
}

#[async_trait]
impl IssueSource for StaticIssueSource {
    fn current_event_action(&self) -> String {
        self.action.clone()
    }

    fn current_event_issue(&self) -> IssueRecord {
        self.event_issue.clone()
    }

    async fn fetch_all(&self) -> Result<Vec<IssueRecord>, SyncError> {
        if self.fail_fetch {
            return Err(SyncError::Fetch(GitHubError::Unauthorized));
        }
        Ok(self.issues.clone())
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// Calls received by `RecordingSink`, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCall {
    Create(i64),
    Find(i64),
    Update(i64),
    ProvisionSchema,
}

/// Sink keeping records in memory and following the `RecordSink` contract
#[derive(Default)]
pub struct RecordingSink {
    records: Arc<RwLock<Vec<IssueRecord>>>,
    calls: Arc<RwLock<Vec<SinkCall>>>,
    failing_finds: HashSet<i64>,
    failing_writes: HashSet<i64>,
    failing_schema: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, issue: IssueRecord) -> Self {
        self.records.write().unwrap().push(issue);
        self
    }

    pub fn failing_find_for(mut self, id: i64) -> Self {
        self.failing_finds.insert(id);
        self
    }

    pub fn failing_write_for(mut self, id: i64) -> Self {
        self.failing_writes.insert(id);
        self
    }

    pub fn failing_schema(mut self) -> Self {
        self.failing_schema = true;
        self
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.read().unwrap().clone()
    }

    /// Calls other than `Find`
    pub fn writes(&self) -> Vec<SinkCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, SinkCall::Find(_)))
            .collect()
    }

    pub fn records(&self) -> Vec<IssueRecord> {
        self.records.read().unwrap().clone()
    }

    fn record(&self, call: SinkCall) {
        self.calls.write().unwrap().push(call);
    }
}

#[async_trait]
impl RecordSink for RecordingSink {
    async fn create(&self, issue: &IssueRecord) -> Result<(), SyncError> {
        self.record(SinkCall::Create(issue.id()));

        if self.failing_writes.contains(&issue.id()) {
            return Err(SyncError::Create {
                id: issue.id(),
                source: api_error("create failed"),
            });
        }
        self.records.write().unwrap().push(issue.clone());
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Option<RecordHandle>, SyncError> {
        self.record(SinkCall::Find(id));

        if self.failing_finds.contains(&id) {
            return Err(SyncError::Query {
                id,
                source: api_error("query failed"),
            });
        }
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .any(|r| r.id() == id)
            .then(|| RecordHandle {
                page_id: format!("page-{}", id),
            }))
    }

    async fn update(&self, id: i64, issue: &IssueRecord) -> Result<(), SyncError> {
        self.record(SinkCall::Update(id));

        if self.failing_writes.contains(&id) {
            return Err(SyncError::Update {
                id,
                source: api_error("update failed"),
            });
        }
        let mut records = self.records.write().unwrap();
        if let Some(existing) = records.iter_mut().find(|r| r.id() == id) {
            *existing = issue.clone();
        }
        Ok(())
    }

    async fn provision_schema(&self) -> Result<(), SyncError> {
        self.record(SinkCall::ProvisionSchema);

        if self.failing_schema {
            return Err(SyncError::Schema(api_error("schema update failed")));
        }
        Ok(())
    }
}
