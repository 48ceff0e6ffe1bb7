//! GitHub adapter
//!
//! Implementation of the GitHub REST client, the event payload reader and
//! the issue source built on them.

pub mod client;
pub mod event;
pub mod issue_source;

pub use client::GitHubClientImpl;
pub use event::GitHubEvent;
pub use issue_source::GitHubIssueSource;
