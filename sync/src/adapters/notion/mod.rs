//! Notion adapter
//!
//! Implementation of the Notion API client and the record sink.

pub mod client;
pub mod properties;
pub mod record_sink;

pub use client::NotionClientImpl;
pub use record_sink::NotionRecordSink;
