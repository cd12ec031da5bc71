//! Handlers for the `/schedules` resource.
//!
//! Reads are open. Every mutation requires an [`Operator`] and is checked
//! against the action policy by the repository, under the store's write
//! lock, before anything is written. The permission flags a client shows are
//! advisory; this is the gate.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use broadcast_core::actions::{available_actions, ScheduleAction, ScheduleActions};
use broadcast_core::aggregation::aggregate_conflicts;
use broadcast_core::conflict::{conflicts_for, has_conflicts, ScheduleConflict};
use broadcast_core::error::CoreError;
use broadcast_core::schedule::{Schedule, ScheduleStatus};
use broadcast_core::types::EntityId;
use broadcast_db::models::schedule::{
    BulkDeleteRequest, CreateSchedule, DeleteQuery, ScheduleListQuery, TransitionRequest,
    UpdateSchedule,
};
use broadcast_db::repositories::ScheduleRepo;
use broadcast_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::operator::Operator;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A schedule together with what the operator may do with it and what it
/// collides with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetail {
    pub schedule: Schedule,
    pub actions: ScheduleActions,
    pub has_conflicts: bool,
    pub conflicts: Vec<ScheduleConflict>,
}

/// One entry of an action menu.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub action: ScheduleAction,
    pub label: &'static str,
    pub destructive: bool,
    /// Empty when no confirmation is needed.
    pub confirm_message: String,
}

/// Permission flags plus the menu entries they enable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMenu {
    pub status: ScheduleStatus,
    #[serde(flatten)]
    pub flags: ScheduleActions,
    pub items: Vec<ActionItem>,
}

impl ActionMenu {
    fn for_schedule(schedule: &Schedule) -> Self {
        let flags = available_actions(schedule.status);
        let items = flags
            .permitted()
            .into_iter()
            .map(|action| ActionItem {
                action,
                label: action.label(),
                destructive: action.is_destructive(),
                confirm_message: action.confirm_message(&schedule.title),
            })
            .collect();

        ActionMenu {
            status: schedule.status,
            flags,
            items,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_or_404(pool: &DbPool, id: &str) -> AppResult<Schedule> {
    ScheduleRepo::find_by_id(pool, id).await.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: id.to_string(),
        })
    })
}

/// Store-wide conflicts, one record per pair.
async fn all_conflicts(pool: &DbPool) -> Vec<ScheduleConflict> {
    aggregate_conflicts(&ScheduleRepo::list(pool).await)
}

/// Records from `all` that involve `schedule_id` on either side.
fn involving(schedule_id: &str, all: &[ScheduleConflict]) -> Vec<ScheduleConflict> {
    conflicts_for(schedule_id, all).into_iter().cloned().collect()
}

async fn transition(
    state: &AppState,
    operator: &Operator,
    id: &str,
    action: ScheduleAction,
    input: TransitionRequest,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let schedule = ScheduleRepo::transition(
        &state.pool,
        id,
        action,
        input.expected_status,
        &operator.id,
    )
    .await?;

    tracing::info!(
        schedule_id = %schedule.id,
        action = action.label(),
        from = %input.expected_status,
        to = %schedule.status,
        operator = %operator.id,
        "Schedule status changed",
    );

    Ok(Json(DataResponse { data: schedule }))
}

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

/// GET /api/v1/schedules
///
/// Optional `unit_id` restricts to schedules visible from that unit and its
/// descendants (whole-system schedules included); optional `status` filters
/// by status.
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<ScheduleListQuery>,
) -> AppResult<impl IntoResponse> {
    let schedules = ScheduleRepo::list_filtered(&state.pool, &params).await;
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/v1/schedules/{id}
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let schedule = find_or_404(&state.pool, &id).await?;
    let all = all_conflicts(&state.pool).await;

    Ok(Json(DataResponse {
        data: ScheduleDetail {
            actions: available_actions(schedule.status),
            has_conflicts: has_conflicts(&schedule.id, &all),
            conflicts: involving(&schedule.id, &all),
            schedule,
        },
    }))
}

/// GET /api/v1/schedules/{id}/actions
pub async fn get_schedule_actions(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let schedule = find_or_404(&state.pool, &id).await?;
    Ok(Json(DataResponse {
        data: ActionMenu::for_schedule(&schedule),
    }))
}

/// GET /api/v1/schedules/{id}/conflicts
pub async fn get_schedule_conflicts(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let schedule = find_or_404(&state.pool, &id).await?;
    let all = all_conflicts(&state.pool).await;
    Ok(Json(DataResponse {
        data: involving(&schedule.id, &all),
    }))
}

// ---------------------------------------------------------------------------
// Create / update / delete
// ---------------------------------------------------------------------------

/// POST /api/v1/schedules
///
/// Stores a draft, or a pending-approval schedule when `submit` is set.
pub async fn create_schedule(
    operator: Operator,
    State(state): State<AppState>,
    Json(input): Json<CreateSchedule>,
) -> AppResult<impl IntoResponse> {
    let schedule = ScheduleRepo::create(&state.pool, input).await?;

    tracing::info!(
        schedule_id = %schedule.id,
        status = %schedule.status,
        operator = %operator.id,
        "Schedule created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: schedule })))
}

/// PUT /api/v1/schedules/{id}
pub async fn update_schedule(
    operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateSchedule>,
) -> AppResult<impl IntoResponse> {
    let schedule = ScheduleRepo::update(&state.pool, &id, input).await?;

    tracing::info!(schedule_id = %id, operator = %operator.id, "Schedule updated");

    Ok(Json(DataResponse { data: schedule }))
}

/// DELETE /api/v1/schedules/{id}?expected_status=
pub async fn delete_schedule(
    operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<DeleteQuery>,
) -> AppResult<impl IntoResponse> {
    let removed = ScheduleRepo::delete(&state.pool, &id, params.expected_status).await?;

    tracing::info!(
        schedule_id = %id,
        status = %removed.status,
        operator = %operator.id,
        "Schedule deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/schedules/bulk-delete
///
/// Deletes every listed schedule whose status allows it and reports the
/// rest as skipped. 409 if none could be deleted.
pub async fn bulk_delete_schedules(
    operator: Operator,
    State(state): State<AppState>,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<impl IntoResponse> {
    let result = ScheduleRepo::bulk_delete(&state.pool, &input.ids).await?;

    tracing::info!(
        requested = result.total,
        deleted = result.deleted.len(),
        skipped = result.skipped.len(),
        operator = %operator.id,
        "Bulk delete finished",
    );

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/schedules/{id}/cancel
pub async fn cancel_schedule(
    operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(&state, &operator, &id, ScheduleAction::Cancel, input).await
}

/// POST /api/v1/schedules/{id}/approve
///
/// Records the operator as `approvedBy`.
pub async fn approve_schedule(
    operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(&state, &operator, &id, ScheduleAction::Approve, input).await
}

/// POST /api/v1/schedules/{id}/reject
pub async fn reject_schedule(
    operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    transition(&state, &operator, &id, ScheduleAction::Reject, input).await
}
