//! Domain layer
//!
//! Contains pure sync logic types with no external dependencies.
//! - `entities`: issue records and trigger kinds
//! - `ports`: Trait definitions for the source, the sink and their API clients

pub mod entities;
pub mod ports;
