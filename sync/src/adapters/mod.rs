//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod github;
pub mod notion;

pub use github::{GitHubClientImpl, GitHubEvent, GitHubIssueSource};
pub use notion::{NotionClientImpl, NotionRecordSink};
