pub mod conflicts;
pub mod health;
pub mod reference;
pub mod schedules;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /schedules                          list, create
/// /schedules/bulk-delete              bulk delete (POST)
/// /schedules/{id}                     detail, update, delete
/// /schedules/{id}/actions             permitted actions
/// /schedules/{id}/conflicts           conflicts of one schedule
/// /schedules/{id}/cancel              cancel (POST)
/// /schedules/{id}/approve             approve (POST)
/// /schedules/{id}/reject              reject (POST)
///
/// /conflicts                          aggregated conflicts
/// /conflicts/stats                    severity counts
///
/// /units                              list
/// /units/{id}/devices                 devices in the unit subtree
/// /devices                            list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/schedules", schedules::router())
        .nest("/conflicts", conflicts::router())
        .merge(reference::router())
}
