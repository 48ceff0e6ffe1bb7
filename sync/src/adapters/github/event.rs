//! Payload of the workflow event that triggered the run
//!
//! Actions writes the webhook payload to the file named by
//! `GITHUB_EVENT_PATH`. A missing or unreadable file behaves like an
//! empty payload.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::IssueRecord;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubEvent {
    /// Any JSON type; only a string counts as an action
    #[serde(default)]
    pub action: Value,
    #[serde(default)]
    pub issue: Option<Value>,
}

impl GitHubEvent {
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No event payload path, using empty payload");
            return Self::default();
        };

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Event payload not readable");
                return Self::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Event payload is not valid JSON");
            Self::default()
        })
    }

    pub fn action(&self) -> String {
        self.action.as_str().unwrap_or_default().to_string()
    }

    pub fn issue(&self) -> IssueRecord {
        match &self.issue {
            Some(raw) if !raw.is_null() => IssueRecord::from_value(raw),
            _ => IssueRecord::default(),
        }
    }
}
