//! GitHub → Notion issue sync
//!
//! Runs as a GitHub Action step and mirrors repository issues as pages of
//! a Notion database. Uses ports & adapters: the sync service only sees
//! an issue source and a record sink.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;

#[cfg(test)]
mod test_utils;

use adapters::{GitHubClientImpl, GitHubEvent, GitHubIssueSource, NotionClientImpl, NotionRecordSink};
use app::SyncService;
use config::Config;
use domain::entities::EventKind;
use error::SyncError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gh_notion_sync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Top-level message only, never the source chain
            let message = err.to_string();
            tracing::error!("{}", message);
            println!("::error::{}", escape_workflow_data(&message));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().map_err(SyncError::from)?;
    config.log_summary();

    let github = Arc::new(GitHubClientImpl::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
    ));
    let source = Arc::new(GitHubIssueSource::new(
        github,
        GitHubEvent::load(config.event_path.as_deref()),
        config.repository.clone(),
        config.issue_filter,
    ));

    let notion = Arc::new(NotionClientImpl::new(
        config.notion_api_url.clone(),
        config.notion_api_key.clone(),
    ));
    let sink = Arc::new(NotionRecordSink::new(
        notion,
        config.notion_database_id.clone(),
        config.write_delay,
    ));

    let service = SyncService::new(source, sink);
    service
        .run(&EventKind::from_event_name(&config.event_name), config.dispatch)
        .await?;

    Ok(())
}

/// Escape a workflow command message (`%`, CR and LF)
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
