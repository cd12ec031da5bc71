//! Create/edit-time checks for schedules.
//!
//! These run in the mutation layer before a schedule is stored. Conflict
//! detection and the action policy never call them and tolerate any field
//! combination.

use crate::error::CoreError;
use crate::schedule::{Schedule, ScheduleType, SourceType, MAX_PRIORITY, MIN_PRIORITY};

pub const MIN_TITLE_LEN: usize = 5;
pub const MAX_TITLE_LEN: usize = 100;

/// Highest weekday index (Saturday). Sunday is 0.
pub const MAX_WEEKDAY: u8 = 6;

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Title must be 5-100 characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if (MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&len) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Title must be between {MIN_TITLE_LEN} and {MAX_TITLE_LEN} characters, got {len}"
        )))
    }
}

pub fn validate_priority(priority: i32) -> Result<(), CoreError> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {priority}"
        )))
    }
}

/// The populated payload fields must match `source_type`.
pub fn validate_source_payload(schedule: &Schedule) -> Result<(), CoreError> {
    match schedule.source_type {
        SourceType::Tts if is_blank(schedule.tts_content.as_deref()) => Err(
            CoreError::Validation("TTS schedules require tts_content".into()),
        ),
        SourceType::File | SourceType::Stream if is_blank(schedule.source_url.as_deref()) => {
            Err(CoreError::Validation(format!(
                "{:?} schedules require source_url",
                schedule.source_type
            )))
        }
        SourceType::Relay if is_blank(schedule.source_unit_id.as_deref()) => Err(
            CoreError::Validation("Relay schedules require source_unit_id".into()),
        ),
        SourceType::Relay if is_blank(schedule.source_channel_id.as_deref()) => Err(
            CoreError::Validation("Relay schedules require source_channel_id".into()),
        ),
        _ => Ok(()),
    }
}

/// End after start; weekdays only on routine schedules and within 0-6.
pub fn validate_timing(schedule: &Schedule) -> Result<(), CoreError> {
    if let Some(end) = schedule.end_time {
        if end <= schedule.start_time {
            return Err(CoreError::Validation(
                "end_time must be after start_time".into(),
            ));
        }
    }

    if schedule.days_of_week.is_empty() {
        return Ok(());
    }

    if schedule.schedule_type != ScheduleType::Routine {
        return Err(CoreError::Validation(
            "days_of_week is only allowed on routine schedules".into(),
        ));
    }

    if let Some(day) = schedule.days_of_week.iter().find(|d| **d > MAX_WEEKDAY) {
        return Err(CoreError::Validation(format!(
            "Invalid weekday {day}. Must be between 0 (Sunday) and {MAX_WEEKDAY}"
        )));
    }

    Ok(())
}

/// Run every create/edit-time check.
pub fn validate_schedule(schedule: &Schedule) -> Result<(), CoreError> {
    validate_title(&schedule.title)?;
    validate_priority(schedule.priority)?;
    validate_source_payload(schedule)?;
    validate_timing(schedule)
}
