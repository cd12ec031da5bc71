//! Schedule status transitions.
//!
//! The permission table in [`crate::actions`] decides whether an action may
//! be attempted. This module maps transition-triggering actions to their
//! resulting status and provides the checks a mutation layer runs before
//! writing: policy authorization and the optimistic expected-status check.

use crate::actions::{can_perform, ScheduleAction};
use crate::error::CoreError;
use crate::schedule::{Schedule, ScheduleStatus};

/// Status a schedule moves to when `action` is applied, or `None` if the
/// action does not change status.
pub fn target_status(action: ScheduleAction) -> Option<ScheduleStatus> {
    match action {
        ScheduleAction::Cancel => Some(ScheduleStatus::Canceled),
        ScheduleAction::Approve => Some(ScheduleStatus::Approved),
        ScheduleAction::Reject => Some(ScheduleStatus::Rejected),
        ScheduleAction::View | ScheduleAction::Edit | ScheduleAction::Delete => None,
    }
}

/// Reject `action` with [`CoreError::Forbidden`] if the policy table does not
/// permit it for `status`.
pub fn authorize(status: ScheduleStatus, action: ScheduleAction) -> Result<(), CoreError> {
    if can_perform(status, action) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Cannot {} a schedule in status {status}",
            action.label().to_lowercase()
        )))
    }
}

/// Fail with [`CoreError::TransitionRejected`] if the schedule's status is
/// no longer the one the operator saw when the action was offered.
pub fn check_expected_status(
    schedule_id: &str,
    expected: ScheduleStatus,
    actual: ScheduleStatus,
) -> Result<(), CoreError> {
    if expected == actual {
        Ok(())
    } else {
        Err(CoreError::TransitionRejected {
            schedule_id: schedule_id.to_string(),
            expected,
            actual,
        })
    }
}

/// Apply a status-changing `action` to `schedule`.
///
/// Runs the expected-status check, then the policy check, then sets the new
/// status. Approvals record `actor` in `approved_by`. The schedule is left
/// untouched on error.
pub fn apply_transition(
    schedule: &mut Schedule,
    action: ScheduleAction,
    expected: ScheduleStatus,
    actor: &str,
) -> Result<ScheduleStatus, CoreError> {
    let next = target_status(action).ok_or_else(|| {
        CoreError::Validation(format!("{} is not a status transition", action.label()))
    })?;

    check_expected_status(&schedule.id, expected, schedule.status)?;
    authorize(schedule.status, action)?;

    schedule.status = next;
    if action == ScheduleAction::Approve {
        schedule.approved_by = Some(actor.to_string());
    }

    Ok(next)
}
