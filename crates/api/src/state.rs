use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: both fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Schedule store and reference data.
    pub pool: broadcast_db::DbPool,
    pub config: Arc<ServerConfig>,
}
