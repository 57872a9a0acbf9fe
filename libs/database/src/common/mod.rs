//! Helpers shared by the database connectors

pub mod retry;

pub use retry::{Backoff, retry_with_backoff};
