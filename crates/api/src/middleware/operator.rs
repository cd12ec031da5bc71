//! Operator identification extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use broadcast_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the operator's id.
pub const OPERATOR_HEADER: &str = "x-operator-id";

/// The operator behind a mutating request, taken from the `x-operator-id`
/// header. Authentication happens upstream; this only requires the header to
/// be present and non-blank.
///
/// ```ignore
/// async fn approve(operator: Operator, ...) -> AppResult<Json<()>> {
///     tracing::info!(operator = %operator.id, "approving");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Operator {
    pub id: String,
}

impl FromRequestParts<AppState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(OPERATOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {OPERATOR_HEADER} header"
                )))
            })?;

        Ok(Operator { id: id.to_string() })
    }
}
