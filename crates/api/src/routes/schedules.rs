//! Route definitions for the `/schedules` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::schedules;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
///
/// ```text
/// GET    /                  -> list_schedules
/// POST   /                  -> create_schedule
/// POST   /bulk-delete       -> bulk_delete_schedules
/// GET    /{id}              -> get_schedule
/// PUT    /{id}              -> update_schedule
/// DELETE /{id}              -> delete_schedule
/// GET    /{id}/actions      -> get_schedule_actions
/// GET    /{id}/conflicts    -> get_schedule_conflicts
/// POST   /{id}/cancel       -> cancel_schedule
/// POST   /{id}/approve      -> approve_schedule
/// POST   /{id}/reject       -> reject_schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(schedules::list_schedules).post(schedules::create_schedule),
        )
        .route("/bulk-delete", post(schedules::bulk_delete_schedules))
        .route(
            "/{id}",
            get(schedules::get_schedule)
                .put(schedules::update_schedule)
                .delete(schedules::delete_schedule),
        )
        .route("/{id}/actions", get(schedules::get_schedule_actions))
        .route("/{id}/conflicts", get(schedules::get_schedule_conflicts))
        .route("/{id}/cancel", post(schedules::cancel_schedule))
        .route("/{id}/approve", post(schedules::approve_schedule))
        .route("/{id}/reject", post(schedules::reject_schedule))
}
