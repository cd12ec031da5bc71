//! Handlers for the `/conflicts` resource.
//!
//! Conflicts are computed on demand from a snapshot of the store; nothing is
//! cached between requests.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use broadcast_core::aggregation::{aggregate_conflicts, conflict_stats};
use broadcast_db::models::schedule::ScheduleListQuery;
use broadcast_db::repositories::ScheduleRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/conflicts
///
/// One record per conflicting pair. Accepts the same `unit_id` / `status`
/// filters as the schedule list; conflicts are detected within the filtered
/// set only.
pub async fn list_conflicts(
    State(state): State<AppState>,
    Query(params): Query<ScheduleListQuery>,
) -> AppResult<impl IntoResponse> {
    let schedules = ScheduleRepo::list_filtered(&state.pool, &params).await;
    let conflicts = aggregate_conflicts(&schedules);

    tracing::debug!(
        schedules = schedules.len(),
        conflicts = conflicts.len(),
        "Aggregated conflicts"
    );

    Ok(Json(DataResponse { data: conflicts }))
}

/// GET /api/v1/conflicts/stats
pub async fn conflict_stats_summary(
    State(state): State<AppState>,
    Query(params): Query<ScheduleListQuery>,
) -> AppResult<impl IntoResponse> {
    let schedules = ScheduleRepo::list_filtered(&state.pool, &params).await;
    let stats = conflict_stats(&aggregate_conflicts(&schedules));
    Ok(Json(DataResponse { data: stats }))
}
