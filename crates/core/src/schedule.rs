//! Broadcast schedule model.
//!
//! A [`Schedule`] is a single concrete broadcast instance: absolute start and
//! (optional) end, a source payload, and the units/devices it targets. The
//! JSON wire shape uses camelCase fields and SCREAMING_SNAKE_CASE enum
//! values so the console frontend can consume it unchanged.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Duration assumed for a schedule without an `end_time`, in minutes.
pub const DEFAULT_DURATION_MINS: i64 = 60;

/// Lowest accepted priority.
pub const MIN_PRIORITY: i32 = 1;

/// Highest accepted priority. Emergency broadcasts conventionally use 9-10.
pub const MAX_PRIORITY: i32 = 10;

/// Statuses that never participate in conflict detection.
pub const INACTIVE_STATUSES: &[ScheduleStatus] = &[
    ScheduleStatus::Canceled,
    ScheduleStatus::Rejected,
    ScheduleStatus::Draft,
];

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// How a schedule recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleType {
    /// Daily/weekly recurrence described by `days_of_week`.
    Routine,
    OneTime,
    /// Highest-priority broadcast.
    Emergency,
}

/// Where the audio comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    File,
    Stream,
    Tts,
    /// Tiered down from an upstream administrative level.
    Relay,
}

/// Administrative level a relay is received from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayLevel {
    Province,
    District,
    Commune,
}

/// Workflow status of a schedule.
///
/// Unrecognized wire values deserialize to [`ScheduleStatus::Unknown`] so a
/// newer producer never breaks an older consumer; the action policy treats
/// it as view-only. The original wire value is not kept: an `Unknown` status
/// serializes back as `"UNKNOWN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Draft,
    PendingApproval,
    Ready,
    Running,
    Completed,
    Approved,
    Canceled,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ScheduleStatus {
    /// Every known status, in workflow order. Excludes `Unknown`.
    pub const ALL: [ScheduleStatus; 8] = [
        ScheduleStatus::Draft,
        ScheduleStatus::PendingApproval,
        ScheduleStatus::Ready,
        ScheduleStatus::Running,
        ScheduleStatus::Completed,
        ScheduleStatus::Approved,
        ScheduleStatus::Canceled,
        ScheduleStatus::Rejected,
    ];

    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Draft => "DRAFT",
            ScheduleStatus::PendingApproval => "PENDING_APPROVAL",
            ScheduleStatus::Ready => "READY",
            ScheduleStatus::Running => "RUNNING",
            ScheduleStatus::Completed => "COMPLETED",
            ScheduleStatus::Approved => "APPROVED",
            ScheduleStatus::Canceled => "CANCELED",
            ScheduleStatus::Rejected => "REJECTED",
            ScheduleStatus::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` if schedules in this status take part in conflict
    /// detection.
    pub fn is_active(self) -> bool {
        !INACTIVE_STATUSES.contains(&self)
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// A planned broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit that created the schedule.
    pub owner_unit_id: EntityId,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub priority: i32,

    pub source_type: SourceType,
    /// File or stream location (FILE / STREAM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Text to synthesize (TTS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts_content: Option<String>,
    /// Upstream unit (RELAY).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_unit_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_from_level: Option<RelayLevel>,

    pub start_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    /// Weekday indices (Sunday = 0). Only meaningful for `Routine`.
    #[serde(default)]
    pub days_of_week: Vec<u8>,

    /// Empty unit and device lists together mean "whole system".
    #[serde(default)]
    pub target_unit_ids: Vec<EntityId>,
    #[serde(default)]
    pub target_device_ids: Vec<EntityId>,

    pub status: ScheduleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    pub created_at: Timestamp,
}

impl Schedule {
    /// End of the broadcast window: `end_time`, or `start_time` plus
    /// [`DEFAULT_DURATION_MINS`] when no end is set. Saturates at
    /// `Timestamp::MAX_UTC`.
    pub fn effective_end(&self) -> Timestamp {
        self.end_time.unwrap_or_else(|| {
            self.start_time
                .checked_add_signed(Duration::minutes(DEFAULT_DURATION_MINS))
                .unwrap_or(Timestamp::MAX_UTC)
        })
    }

    /// Returns `true` if the schedule can conflict with others.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_relay(&self) -> bool {
        self.source_type == SourceType::Relay
    }

    /// Returns `true` if the schedule targets no specific unit or device.
    pub fn is_whole_system(&self) -> bool {
        self.target_unit_ids.is_empty() && self.target_device_ids.is_empty()
    }
}
