//! Application layer
//!
//! Contains the sync use cases and their orchestration.

pub mod sync_service;

pub use sync_service::SyncService;
