//! Shared application state.

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

/// Cloned into route builders; every member is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares the underlying connection pool
    pub mongo_client: Client,
    pub db: Database,
    pub auth: JwtAuth,
}
