//! Domain ports (traits)
//!
//! Port traits define interfaces that the sync requires.
//! Adapters provide concrete implementations of these traits.

pub mod github;
pub mod notion;
pub mod sync;

pub use github::GitHubClient;
pub use notion::{
    MultiSelectProperty, NotionClient, NotionDatabase, NotionPage, NumberProperty,
    PageProperties, RichText, SelectOption, SelectProperty, TextContent, TitleProperty,
    UrlProperty,
};
pub use sync::{IssueSource, RecordHandle, RecordSink};
