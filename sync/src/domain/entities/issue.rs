//! Issue domain entity
//!
//! Issues live in GitHub (source of truth). `IssueRecord` is the sync's
//! read-only view of the fields mirrored into the database.

use serde::Deserialize;
use serde_json::Value;

/// Issue state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            _ => Err(format!("Unknown issue state: {}", s)),
        }
    }
}

/// Which issues a full sync lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueFilter {
    All,
    Closed,
    #[default]
    Open,
}

impl IssueFilter {
    /// Map the `issueType` input. Only `all` and `close` are recognized;
    /// everything else, including no input, lists open issues.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("all") => IssueFilter::All,
            Some("close") => IssueFilter::Closed,
            _ => IssueFilter::Open,
        }
    }

    /// Value of the `state` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            IssueFilter::All => "all",
            IssueFilter::Closed => "closed",
            IssueFilter::Open => "open",
        }
    }
}

/// A single issue, normalized from a raw (possibly partial) payload
///
/// Every field is read independently and falls back to a default when it
/// is missing or has the wrong type, so building one never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct IssueRecord {
    id: i64,
    title: String,
    url: String,
    state: IssueState,
    labels: Vec<String>,
}

impl IssueRecord {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        url: impl Into<String>,
        state: IssueState,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            state,
            labels: dedup_labels(labels.into_iter().map(Into::into)),
        }
    }

    pub fn from_value(raw: &Value) -> Self {
        let text = |key: &str| {
            raw.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let labels: Vec<String> = raw
            .get("labels")
            .and_then(Value::as_array)
            .map(|labels| labels.iter().filter_map(label_name).collect())
            .unwrap_or_default();

        Self {
            id: raw.get("id").and_then(Value::as_i64).unwrap_or_default(),
            title: text("title"),
            url: text("html_url"),
            state: raw
                .get("state")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            labels: dedup_labels(labels),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> IssueState {
        self.state
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl From<Value> for IssueRecord {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}

/// Labels come either as objects (`{"name": "bug", ...}`) or bare strings
fn label_name(label: &Value) -> Option<String> {
    match label {
        Value::String(name) => Some(name.clone()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
    .filter(|name| !name.is_empty())
}

fn dedup_labels(labels: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for label in labels {
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen
}
