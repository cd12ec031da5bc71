//! Route definitions for the `/conflicts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::conflicts;
use crate::state::AppState;

/// Routes mounted at `/conflicts`.
///
/// ```text
/// GET /         -> list_conflicts
/// GET /stats    -> conflict_stats_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(conflicts::list_conflicts))
        .route("/stats", get(conflicts::conflict_stats_summary))
}
