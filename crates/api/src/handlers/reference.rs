//! Read-only handlers for units and devices.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use broadcast_core::error::CoreError;
use broadcast_core::targeting::Device;
use broadcast_core::types::EntityId;
use broadcast_db::repositories::{DeviceRepo, UnitRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/units
pub async fn list_units(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: UnitRepo::list(&state.pool).to_vec(),
    }))
}

/// GET /api/v1/units/{id}/devices
///
/// Devices attached to the unit or any descendant unit.
pub async fn list_unit_devices(
    State(state): State<AppState>,
    Path(unit_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    if UnitRepo::find_by_id(&state.pool, &unit_id).is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Unit",
            id: unit_id,
        }));
    }

    let devices: Vec<Device> = DeviceRepo::list_in_unit(&state.pool, &unit_id)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse { data: devices }))
}

/// GET /api/v1/devices
pub async fn list_devices(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: DeviceRepo::list(&state.pool).to_vec(),
    }))
}
