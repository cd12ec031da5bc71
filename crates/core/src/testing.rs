//! Fixtures shared by the unit tests in this crate.

use chrono::{TimeZone, Utc};

use crate::schedule::{Schedule, ScheduleStatus, ScheduleType, SourceType};
use crate::types::Timestamp;

/// 2026-10-16 at `hour:minute` UTC.
pub fn at(hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 10, 16, hour, minute, 0).unwrap()
}

/// A one-time schedule titled after its id, targeting `units`.
pub fn schedule(
    id: &str,
    status: ScheduleStatus,
    source_type: SourceType,
    start: Timestamp,
    end: Option<Timestamp>,
    units: &[&str],
) -> Schedule {
    Schedule {
        id: id.to_string(),
        title: format!("Schedule {id}"),
        description: None,
        owner_unit_id: "owner".to_string(),
        schedule_type: ScheduleType::OneTime,
        priority: 5,
        source_type,
        source_url: None,
        tts_content: None,
        source_unit_id: None,
        source_channel_id: None,
        relay_from_level: None,
        start_time: start,
        end_time: end,
        days_of_week: Vec::new(),
        target_unit_ids: units.iter().map(|u| u.to_string()).collect(),
        target_device_ids: Vec::new(),
        status,
        approved_by: None,
        created_at: at(0, 0),
    }
}
