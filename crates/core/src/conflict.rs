//! Pairwise schedule conflict detection.
//!
//! Two active schedules conflict when their broadcast windows overlap and
//! they share at least one target unit or target device. Detection is
//! one-sided: [`detect_conflicts`] reports conflicts from the subject's point
//! of view only. Use [`crate::aggregation`] for a deduplicated view of a
//! whole schedule set.

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Why two schedules collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictReason {
    TimeOverlap,
    DeviceOverlap,
    /// Exactly one side is a relay and will take over the other's audience.
    RelayOverride,
}

/// How urgently an operator should look at a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictSeverity {
    High,
    Medium,
    Low,
}

/// A detected collision between `schedule_id` and `conflicting_schedule_id`.
///
/// Derived on every detection pass and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConflict {
    pub schedule_id: String,
    pub conflicting_schedule_id: String,
    pub reason: ConflictReason,
    pub severity: ConflictSeverity,
    pub description: String,
}

impl ScheduleConflict {
    /// Returns `true` if either side of the pair is `schedule_id`.
    pub fn involves(&self, schedule_id: &str) -> bool {
        self.schedule_id == schedule_id || self.conflicting_schedule_id == schedule_id
    }

    /// The pair as `(smaller_id, larger_id)`, identical for `{A,B}` and `{B,A}`.
    pub fn pair_key(&self) -> (&str, &str) {
        let a = self.schedule_id.as_str();
        let b = self.conflicting_schedule_id.as_str();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

// ---------------------------------------------------------------------------
// Overlap predicates
// ---------------------------------------------------------------------------

/// Half-open interval overlap: `[start1, end1)` and `[start2, end2)` overlap
/// iff `start1 < end2 && start2 < end1`. Touching endpoints do not overlap.
pub fn is_time_overlap(
    start1: Timestamp,
    end1: Timestamp,
    start2: Timestamp,
    end2: Timestamp,
) -> bool {
    start1 < end2 && start2 < end1
}

/// Returns `true` if the schedules share a target unit id or a target device
/// id. Units are never matched against devices here; callers that need that
/// must pre-expand unit selections into device ids.
pub fn has_target_overlap(a: &Schedule, b: &Schedule) -> bool {
    let unit_overlap = a
        .target_unit_ids
        .iter()
        .any(|unit_id| b.target_unit_ids.contains(unit_id));

    let device_overlap = a
        .target_device_ids
        .iter()
        .any(|device_id| b.target_device_ids.contains(device_id));

    unit_overlap || device_overlap
}

fn windows_overlap(a: &Schedule, b: &Schedule) -> bool {
    is_time_overlap(a.start_time, a.effective_end(), b.start_time, b.effective_end())
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Detect every conflict between `subject` and the schedules in `candidates`.
///
/// The subject may appear in `candidates`; it is skipped by id. Schedules in
/// an inactive status (draft, canceled, rejected) never conflict. Neither
/// input is mutated.
pub fn detect_conflicts(subject: &Schedule, candidates: &[Schedule]) -> Vec<ScheduleConflict> {
    if !subject.is_active() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter(|other| other.id != subject.id && other.is_active())
        .filter(|other| windows_overlap(subject, other))
        .filter(|other| has_target_overlap(subject, other))
        .map(|other| classify(subject, other, true))
        .collect()
}

/// Build the conflict record for a pair already known to overlap in time.
fn classify(subject: &Schedule, other: &Schedule, target_overlap: bool) -> ScheduleConflict {
    let (reason, severity, description) = match (subject.is_relay(), other.is_relay()) {
        (true, false) => (
            ConflictReason::RelayOverride,
            ConflictSeverity::High,
            format!("Relay broadcast overrides local schedule \"{}\"", other.title),
        ),
        (false, true) => (
            ConflictReason::RelayOverride,
            ConflictSeverity::High,
            format!("Local schedule is overridden by relay \"{}\"", other.title),
        ),
        _ if target_overlap => (
            ConflictReason::DeviceOverlap,
            ConflictSeverity::High,
            format!("Same time and targets as \"{}\"", other.title),
        ),
        _ => (
            ConflictReason::TimeOverlap,
            ConflictSeverity::Medium,
            format!("Same time as \"{}\"", other.title),
        ),
    };

    ScheduleConflict {
        schedule_id: subject.id.clone(),
        conflicting_schedule_id: other.id.clone(),
        reason,
        severity,
        description,
    }
}

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Returns `true` if any conflict involves `schedule_id` on either side.
pub fn has_conflicts(schedule_id: &str, conflicts: &[ScheduleConflict]) -> bool {
    conflicts.iter().any(|c| c.involves(schedule_id))
}

/// All conflicts that involve `schedule_id` on either side.
pub fn conflicts_for<'a>(
    schedule_id: &str,
    conflicts: &'a [ScheduleConflict],
) -> Vec<&'a ScheduleConflict> {
    conflicts.iter().filter(|c| c.involves(schedule_id)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
