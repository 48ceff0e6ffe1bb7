use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::entities::{DispatchFlags, IssueFilter};
use crate::error::ConfigError;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";
const DEFAULT_WRITE_DELAY_MS: u64 = 1000;

/// `owner/repo` of the repository the workflow runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl std::str::FromStr for RepoRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidRepository(s.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub github_token: String,
    pub notion_api_key: String,
    pub notion_database_id: String,
    /// Which issues a full sync lists (`issueType` input)
    pub issue_filter: IssueFilter,
    pub event_name: String,
    /// JSON file holding the triggering event's payload
    pub event_path: Option<PathBuf>,
    pub repository: Option<RepoRef>,
    pub github_api_url: String,
    pub notion_api_url: String,
    /// Pause after every database write, to stay under Notion's rate limit
    pub write_delay: Duration,
    pub dispatch: DispatchFlags,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Values are trimmed, like Action inputs,
    /// and empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let first = |keys: &[&str]| keys.iter().find_map(|k| get(*k));

        let github_token = first(&["INPUT_TOKEN", "GH_PAT", "GITHUB_TOKEN"])
            .ok_or(ConfigError::Missing("GitHub token"))?;
        let notion_api_key = first(&["NOTION_API_KEY", "INPUT_NOTION_API_KEY"])
            .ok_or(ConfigError::Missing("Notion Api Key"))?;
        let notion_database_id = first(&["NOTION_DATABASE", "INPUT_NOTION_DATABASE"])
            .ok_or(ConfigError::Missing("Notion Database ID"))?;

        let repository = get("GITHUB_REPOSITORY")
            .map(|slug| slug.parse::<RepoRef>())
            .transpose()?;

        let write_delay = match get("SYNC_WRITE_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "SYNC_WRITE_DELAY_MS",
                    value: raw.clone(),
                })?,
            None => DEFAULT_WRITE_DELAY_MS,
        };

        Ok(Self {
            github_token,
            notion_api_key,
            notion_database_id,
            issue_filter: IssueFilter::from_selector(get("INPUT_ISSUETYPE").as_deref()),
            event_name: get("GITHUB_EVENT_NAME").unwrap_or_default(),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            repository,
            github_api_url: get("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            notion_api_url: get("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            write_delay: Duration::from_millis(write_delay),
            dispatch: DispatchFlags {
                setup: parse_bool_input("setup", get("INPUT_SETUP"))?,
                sync_issues: parse_bool_input("syncIssues", get("INPUT_SYNCISSUES"))?,
            },
        })
    }

    /// Log what was configured without leaking any secret
    pub fn log_summary(&self) {
        tracing::info!(
            github_token = %describe_secret(&self.github_token),
            notion_api_key = %describe_secret(&self.notion_api_key),
            notion_database_id = %self.notion_database_id,
            event_name = %self.event_name,
            issue_filter = self.issue_filter.as_query(),
            "Configuration loaded"
        );
    }
}

// Hand-written so a stray `{:?}` never prints credentials
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &describe_secret(&self.github_token))
            .field("notion_api_key", &describe_secret(&self.notion_api_key))
            .field("notion_database_id", &self.notion_database_id)
            .field("issue_filter", &self.issue_filter)
            .field("event_name", &self.event_name)
            .field("event_path", &self.event_path)
            .field("repository", &self.repository)
            .field("github_api_url", &self.github_api_url)
            .field("notion_api_url", &self.notion_api_url)
            .field("write_delay", &self.write_delay)
            .field("dispatch", &self.dispatch)
            .finish()
    }
}

fn describe_secret(secret: &str) -> String {
    format!("Set (length: {})", secret.len())
}

/// Action boolean inputs follow the YAML 1.2 core schema
fn parse_bool_input(name: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.as_str() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean { name, value }),
    }
}
