//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks rather than mockall: the port traits take `&str` and
//! borrowed records, and hand-written mocks double as small in-memory
//! fakes that keep state between calls.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
