//! Domain entities
//!
//! Plain values the sync passes between the source and the sink.

pub mod issue;
pub mod trigger;

pub use issue::{IssueFilter, IssueRecord, IssueState};
pub use trigger::{DispatchFlags, EventKind};
