//! Whole-set conflict aggregation and statistics.
//!
//! Every conflicting pair is found twice when each schedule is used as the
//! detection subject (`{A,B}` and `{B,A}`). Aggregation keeps the first
//! record per unordered pair, in input order.

use std::collections::HashSet;

use serde::Serialize;

use crate::conflict::{detect_conflicts, ConflictSeverity, ScheduleConflict};
use crate::schedule::Schedule;

/// Conflict counts for dashboards and badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConflictStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ConflictStats {
    /// Count for a single severity.
    pub fn count(&self, severity: ConflictSeverity) -> usize {
        match severity {
            ConflictSeverity::High => self.high,
            ConflictSeverity::Medium => self.medium,
            ConflictSeverity::Low => self.low,
        }
    }
}

/// Detect conflicts across `all` and return one record per unordered pair.
pub fn aggregate_conflicts(all: &[Schedule]) -> Vec<ScheduleConflict> {
    if all.len() < 2 {
        return Vec::new();
    }

    let detected = all
        .iter()
        .flat_map(|schedule| detect_conflicts(schedule, all))
        .collect();

    deduplicate(detected)
}

/// Drop records whose unordered id pair has already been seen.
pub fn deduplicate(conflicts: Vec<ScheduleConflict>) -> Vec<ScheduleConflict> {
    let mut seen: HashSet<(String, String)> = HashSet::new();

    conflicts
        .into_iter()
        .filter(|conflict| {
            let (a, b) = conflict.pair_key();
            seen.insert((a.to_owned(), b.to_owned()))
        })
        .collect()
}

/// Tally `conflicts` by severity.
pub fn conflict_stats(conflicts: &[ScheduleConflict]) -> ConflictStats {
    conflicts
        .iter()
        .fold(ConflictStats::default(), |mut stats, conflict| {
            stats.total += 1;
            match conflict.severity {
                ConflictSeverity::High => stats.high += 1,
                ConflictSeverity::Medium => stats.medium += 1,
                ConflictSeverity::Low => stats.low += 1,
            }
            stats
        })
}

/// Severity histogram in `High, Medium, Low` order.
pub fn count_by_severity(conflicts: &[ScheduleConflict]) -> [(ConflictSeverity, usize); 3] {
    let stats = conflict_stats(conflicts);
    [
        (ConflictSeverity::High, stats.high),
        (ConflictSeverity::Medium, stats.medium),
        (ConflictSeverity::Low, stats.low),
    ]
}
