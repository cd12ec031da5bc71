//! Route definitions for reference data (units, devices).

use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// ```text
/// GET /units                 -> list_units
/// GET /units/{id}/devices    -> list_unit_devices
/// GET /devices               -> list_devices
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/units", get(reference::list_units))
        .route("/units/{id}/devices", get(reference::list_unit_devices))
        .route("/devices", get(reference::list_devices))
}
