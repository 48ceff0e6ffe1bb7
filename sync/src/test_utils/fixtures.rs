//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use serde_json::{json, Value};

use crate::domain::entities::{IssueRecord, IssueState};

/// Create an open test issue labelled `bug`
pub fn test_issue(id: i64) -> IssueRecord {
    IssueRecord::new(
        id,
        format!("Issue {}", id),
        format!("https://github.com/octocat/hello/issues/{}", id),
        IssueState::Open,
        ["bug"],
    )
}

/// Create a list of test issues with consecutive ids
pub fn test_issues(ids: std::ops::RangeInclusive<i64>) -> Vec<IssueRecord> {
    ids.map(test_issue).collect()
}

/// Raw REST payload for an issue, as GitHub sends it
pub fn test_issue_payload(id: i64, state: &str) -> Value {
    json!({
        "id": id,
        "number": id % 1000,
        "title": format!("Issue {}", id),
        "html_url": format!("https://github.com/octocat/hello/issues/{}", id),
        "state": state,
        "labels": [{ "id": 1, "name": "bug", "color": "d73a4a", "default": true }],
        "user": { "login": "octocat" }
    })
}
