//! Shared application state.

use mongodb::{Client, Database};

/// Cloned into routers that need it; clones share the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Kept for readiness checks and shutdown
    pub mongo_client: Client,
    pub db: Database,
}
