//! Notion client port trait
//!
//! Defines the interface for interacting with the Notion API, plus the
//! page property shapes the sync reads and writes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NotionError;

/// Notion database (only what the sync looks at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionDatabase {
    pub id: String,
}

/// Notion page as returned by create / update / query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub properties: Value,
}

impl NotionPage {
    /// Read the mirrored properties back. `None` if the page does not
    /// follow the sync's schema.
    pub fn mirrored_properties(&self) -> Option<PageProperties> {
        serde_json::from_value(self.properties.clone()).ok()
    }
}

/// The properties the sync owns on every page
///
/// Serializes to the write shape Notion expects; deserializes from the
/// read shape, ignoring the extra fields Notion adds (ids, colors, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageProperties {
    #[serde(rename = "Name", default)]
    pub name: TitleProperty,
    #[serde(rename = "URL", default)]
    pub url: UrlProperty,
    #[serde(rename = "State", default)]
    pub state: SelectProperty,
    #[serde(rename = "ID", default)]
    pub id: NumberProperty,
    #[serde(rename = "Label", default)]
    pub label: MultiSelectProperty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichText>,
}

/// Rich text segment (`type: text` only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "text_kind")]
    pub kind: String,
    #[serde(default)]
    pub text: TextContent,
}

fn text_kind() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlProperty {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectProperty {
    #[serde(default)]
    pub select: Option<SelectOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberProperty {
    #[serde(default)]
    pub number: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSelectProperty {
    #[serde(default)]
    pub multi_select: Vec<SelectOption>,
}

/// Trait for the Notion API calls the sync makes
#[async_trait]
pub trait NotionClient: Send + Sync {
    async fn retrieve_database(&self, database_id: &str) -> Result<NotionDatabase, NotionError>;

    /// Query a database; returns the first page of results
    async fn query_database(
        &self,
        database_id: &str,
        filter: Value,
    ) -> Result<Vec<NotionPage>, NotionError>;

    async fn create_page(
        &self,
        database_id: &str,
        properties: &PageProperties,
    ) -> Result<NotionPage, NotionError>;

    async fn update_page(
        &self,
        page_id: &str,
        properties: &PageProperties,
    ) -> Result<NotionPage, NotionError>;

    /// Overwrite the database's property schema
    async fn update_database(
        &self,
        database_id: &str,
        properties: Value,
    ) -> Result<NotionDatabase, NotionError>;
}
