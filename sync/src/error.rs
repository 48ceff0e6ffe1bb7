//! Error types for the sync bridge
//!
//! This module defines error types for each layer:
//! - `ConfigError`: missing or malformed configuration inputs
//! - `GitHubError`: GitHub REST client errors
//! - `NotionError`: Notion API client errors
//! - `SyncError`: sync layer errors (what the orchestrator and `main` see)

use thiserror::Error;

/// Configuration errors, raised before any network call
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    Missing(&'static str),

    #[error("Input {name} does not meet YAML 1.2 \"Core Schema\" specification: {value}")]
    InvalidBoolean { name: &'static str, value: String },

    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid repository '{0}', expected owner/repo")]
    InvalidRepository(String),
}

/// GitHub API client errors
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Repository is not known (GITHUB_REPOSITORY not set)")]
    MissingRepository,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Notion API client errors
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Sync layer errors
///
/// `Fetch`, `Query` and `Schema` abort the pass in progress. `Create` and
/// `Update` are contained per issue during a full sync.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch issues from GitHub: {0}")]
    Fetch(#[source] GitHubError),

    #[error("Failed to query database for issue ID {id}: {source}")]
    Query {
        id: i64,
        #[source]
        source: NotionError,
    },

    #[error("Failed to setup database: {0}")]
    Schema(#[source] NotionError),

    #[error("Cannot access database: {0}")]
    Access(#[source] NotionError),

    #[error("Failed to create page for issue #{id}: {source}")]
    Create {
        id: i64,
        #[source]
        source: NotionError,
    },

    #[error("Failed to update page for issue #{id}: {source}")]
    Update {
        id: i64,
        #[source]
        source: NotionError,
    },
}
