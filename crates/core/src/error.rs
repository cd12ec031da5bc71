use crate::schedule::ScheduleStatus;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The schedule moved to another status after the operator was offered
    /// the action. Callers must re-fetch and re-offer actions.
    #[error(
        "Transition rejected: schedule {schedule_id} is {actual}, expected {expected}"
    )]
    TransitionRejected {
        schedule_id: String,
        expected: ScheduleStatus,
        actual: ScheduleStatus,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
