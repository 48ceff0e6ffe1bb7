//! What started this run

/// Kind of workflow event that triggered the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `issues`: a single issue was opened, edited, closed, ...
    Issues,
    /// `workflow_dispatch`: manual run with setup / sync flags
    WorkflowDispatch,
    Other(String),
}

impl EventKind {
    pub fn from_event_name(name: &str) -> Self {
        match name {
            "issues" => EventKind::Issues,
            "workflow_dispatch" => EventKind::WorkflowDispatch,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// Flags of a manual dispatch. Both are optional and independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchFlags {
    pub setup: bool,
    pub sync_issues: bool,
}
