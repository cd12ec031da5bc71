//! Request DTOs for schedule mutations.
//!
//! Field-level bounds are declared with `validator`; cross-field rules
//! (source payload, timing) live in `broadcast_core::validation` and run on
//! the assembled [`Schedule`].

use broadcast_core::schedule::{
    RelayLevel, Schedule, ScheduleStatus, ScheduleType, SourceType,
};
use broadcast_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// DTO for `POST /api/v1/schedules`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    #[validate(length(min = 5, max = 100))]
    pub title: String,
    pub description: Option<String>,
    pub owner_unit_id: EntityId,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    #[validate(range(min = 1, max = 10))]
    pub priority: i32,

    pub source_type: SourceType,
    pub source_url: Option<String>,
    pub tts_content: Option<String>,
    pub source_unit_id: Option<EntityId>,
    pub source_channel_id: Option<String>,
    pub relay_from_level: Option<RelayLevel>,

    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    #[serde(default)]
    pub days_of_week: Vec<u8>,

    #[serde(default)]
    pub target_unit_ids: Vec<EntityId>,
    #[serde(default)]
    pub target_device_ids: Vec<EntityId>,

    /// Submit for approval immediately instead of saving as a draft.
    #[serde(default)]
    pub submit: bool,
}

impl CreateSchedule {
    /// Assemble the stored schedule.
    pub fn into_schedule(self, id: EntityId, created_at: Timestamp) -> Schedule {
        let status = if self.submit {
            ScheduleStatus::PendingApproval
        } else {
            ScheduleStatus::Draft
        };

        Schedule {
            id,
            title: self.title,
            description: self.description,
            owner_unit_id: self.owner_unit_id,
            schedule_type: self.schedule_type,
            priority: self.priority,
            source_type: self.source_type,
            source_url: self.source_url,
            tts_content: self.tts_content,
            source_unit_id: self.source_unit_id,
            source_channel_id: self.source_channel_id,
            relay_from_level: self.relay_from_level,
            start_time: self.start_time,
            end_time: self.end_time,
            days_of_week: self.days_of_week,
            target_unit_ids: self.target_unit_ids,
            target_device_ids: self.target_device_ids,
            status,
            approved_by: None,
            created_at,
        }
    }
}

/// Distinguishes an explicit `null` from an absent field: absent stays
/// `None` through `#[serde(default)]`, `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// DTO for `PUT /api/v1/schedules/{id}`. Absent fields are left unchanged.
///
/// Optional schedule fields are `Option<Option<T>>`: `null` clears the
/// stored value. Status is never edited here; use the cancel/approve/reject
/// actions.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedule {
    /// Status the operator saw when opening the editor.
    pub expected_status: Option<ScheduleStatus>,

    #[validate(length(min = 5, max = 100))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub schedule_type: Option<ScheduleType>,
    #[validate(range(min = 1, max = 10))]
    pub priority: Option<i32>,

    pub source_type: Option<SourceType>,
    #[serde(default, deserialize_with = "nullable")]
    pub source_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tts_content: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub source_unit_id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub source_channel_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub relay_from_level: Option<Option<RelayLevel>>,

    pub start_time: Option<Timestamp>,
    /// `null` falls back to the default duration.
    #[serde(default, deserialize_with = "nullable")]
    pub end_time: Option<Option<Timestamp>>,
    pub days_of_week: Option<Vec<u8>>,

    pub target_unit_ids: Option<Vec<EntityId>>,
    pub target_device_ids: Option<Vec<EntityId>>,
}

impl UpdateSchedule {
    /// Copy every present field onto `schedule`.
    pub fn apply_to(self, schedule: &mut Schedule) {
        if let Some(title) = self.title {
            schedule.title = title;
        }
        if let Some(schedule_type) = self.schedule_type {
            schedule.schedule_type = schedule_type;
        }
        if let Some(priority) = self.priority {
            schedule.priority = priority;
        }
        if let Some(source_type) = self.source_type {
            schedule.source_type = source_type;
        }
        if let Some(start_time) = self.start_time {
            schedule.start_time = start_time;
        }
        if let Some(days) = self.days_of_week {
            schedule.days_of_week = days;
        }
        if let Some(units) = self.target_unit_ids {
            schedule.target_unit_ids = units;
        }
        if let Some(devices) = self.target_device_ids {
            schedule.target_device_ids = devices;
        }

        // Outer `Some` replaces (possibly with `None`), outer `None` keeps.
        if let Some(description) = self.description {
            schedule.description = description;
        }
        if let Some(source_url) = self.source_url {
            schedule.source_url = source_url;
        }
        if let Some(tts_content) = self.tts_content {
            schedule.tts_content = tts_content;
        }
        if let Some(source_unit_id) = self.source_unit_id {
            schedule.source_unit_id = source_unit_id;
        }
        if let Some(source_channel_id) = self.source_channel_id {
            schedule.source_channel_id = source_channel_id;
        }
        if let Some(relay_from_level) = self.relay_from_level {
            schedule.relay_from_level = relay_from_level;
        }
        if let Some(end_time) = self.end_time {
            schedule.end_time = end_time;
        }
    }
}

/// Body of `POST /api/v1/schedules/{id}/{cancel,approve,reject}`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    /// Status the operator saw when the action was offered.
    pub expected_status: ScheduleStatus,
}

/// Query parameters for `GET /api/v1/schedules`.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleListQuery {
    /// Restrict to schedules visible from this unit (descendants included).
    pub unit_id: Option<EntityId>,
    pub status: Option<ScheduleStatus>,
}

/// Query parameters for `DELETE /api/v1/schedules/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    pub expected_status: Option<ScheduleStatus>,
}

/// Body of `POST /api/v1/schedules/bulk-delete`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<EntityId>,
}

/// A schedule left in place by a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleteSkip {
    pub id: EntityId,
    pub reason: String,
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkDeleteResult {
    pub total: usize,
    pub deleted: Vec<EntityId>,
    pub skipped: Vec<BulkDeleteSkip>,
}
