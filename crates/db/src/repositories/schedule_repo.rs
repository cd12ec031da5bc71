//! Repository for schedules, and the mutation layer for status changes.
//!
//! Every write takes the store's write lock, re-reads the schedule's current
//! status, checks it against the status the operator observed (when given)
//! and against the action policy, and only then writes. A concurrent change
//! therefore surfaces as `CoreError::TransitionRejected` instead of being
//! silently overwritten.

use broadcast_core::actions::ScheduleAction;
use broadcast_core::error::CoreError;
use broadcast_core::lifecycle::{apply_transition, authorize, check_expected_status};
use broadcast_core::schedule::{Schedule, ScheduleStatus};
use broadcast_core::targeting::filter_schedules_by_unit;
use broadcast_core::types::EntityId;
use broadcast_core::validation::validate_schedule;
use validator::Validate;

use crate::models::schedule::{
    BulkDeleteResult, BulkDeleteSkip, CreateSchedule, ScheduleListQuery, UpdateSchedule,
};
use crate::DbPool;

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Schedule",
        id: id.to_string(),
    }
}

fn field_errors(errors: validator::ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}

/// Provides CRUD and lifecycle operations for schedules.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Snapshot of every schedule, in insertion order.
    pub async fn list(pool: &DbPool) -> Vec<Schedule> {
        pool.schedules.read().await.clone()
    }

    /// Snapshot filtered by unit scope and/or status.
    pub async fn list_filtered(pool: &DbPool, query: &ScheduleListQuery) -> Vec<Schedule> {
        let schedules = pool.schedules.read().await;

        let scoped: Vec<&Schedule> = match query.unit_id.as_deref() {
            Some(unit_id) => {
                filter_schedules_by_unit(unit_id, &schedules, &pool.units, &pool.devices)
            }
            None => schedules.iter().collect(),
        };

        scoped
            .into_iter()
            .filter(|s| query.status.map_or(true, |status| s.status == status))
            .cloned()
            .collect()
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> Option<Schedule> {
        pool.schedules
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Validate and store a new schedule as a draft (or pending approval
    /// when `submit` is set).
    pub async fn create(pool: &DbPool, input: CreateSchedule) -> Result<Schedule, CoreError> {
        input.validate().map_err(field_errors)?;

        let id = uuid::Uuid::new_v4().to_string();
        let schedule = input.into_schedule(id, chrono::Utc::now());
        validate_schedule(&schedule)?;

        pool.schedules.write().await.push(schedule.clone());

        tracing::debug!(schedule_id = %schedule.id, status = %schedule.status, "Schedule stored");
        Ok(schedule)
    }

    /// Edit a schedule whose status permits editing.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: UpdateSchedule,
    ) -> Result<Schedule, CoreError> {
        input.validate().map_err(field_errors)?;

        let mut schedules = pool.schedules.write().await;
        let current = schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(id))?;

        if let Some(expected) = input.expected_status {
            check_expected_status(id, expected, current.status)?;
        }
        authorize(current.status, ScheduleAction::Edit)?;

        let mut edited = current.clone();
        input.apply_to(&mut edited);
        validate_schedule(&edited)?;

        *current = edited.clone();
        Ok(edited)
    }

    /// Remove a schedule whose status permits deletion. Returns the removed
    /// record.
    pub async fn delete(
        pool: &DbPool,
        id: &str,
        expected: Option<ScheduleStatus>,
    ) -> Result<Schedule, CoreError> {
        let mut schedules = pool.schedules.write().await;
        let index = schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found(id))?;

        let status = schedules[index].status;
        if let Some(expected) = expected {
            check_expected_status(id, expected, status)?;
        }
        authorize(status, ScheduleAction::Delete)?;

        Ok(schedules.remove(index))
    }

    /// Delete every deletable schedule in `ids`; the rest are reported as
    /// skipped. Fails only if nothing could be deleted.
    pub async fn bulk_delete(
        pool: &DbPool,
        ids: &[EntityId],
    ) -> Result<BulkDeleteResult, CoreError> {
        if ids.is_empty() {
            return Err(CoreError::Validation("ids must not be empty".into()));
        }

        let mut schedules = pool.schedules.write().await;
        let mut result = BulkDeleteResult {
            total: ids.len(),
            ..Default::default()
        };

        for id in ids {
            let Some(index) = schedules.iter().position(|s| &s.id == id) else {
                result.skipped.push(BulkDeleteSkip {
                    id: id.clone(),
                    reason: "not found".into(),
                });
                continue;
            };

            match authorize(schedules[index].status, ScheduleAction::Delete) {
                Ok(()) => {
                    schedules.remove(index);
                    result.deleted.push(id.clone());
                }
                Err(err) => result.skipped.push(BulkDeleteSkip {
                    id: id.clone(),
                    reason: err.to_string(),
                }),
            }
        }

        if result.deleted.is_empty() {
            return Err(CoreError::Conflict(
                "None of the requested schedules could be deleted".into(),
            ));
        }

        Ok(result)
    }

    /// Apply a status-changing action (cancel / approve / reject).
    ///
    /// `expected` is the status the operator saw; a mismatch is rejected
    /// without writing.
    pub async fn transition(
        pool: &DbPool,
        id: &str,
        action: ScheduleAction,
        expected: ScheduleStatus,
        actor: &str,
    ) -> Result<Schedule, CoreError> {
        let mut schedules = pool.schedules.write().await;
        let schedule = schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(id))?;

        let from = schedule.status;
        if let Err(err) = apply_transition(schedule, action, expected, actor) {
            tracing::debug!(schedule_id = id, action = ?action, from = %from, error = %err, "Transition refused");
            return Err(err);
        }

        Ok(schedule.clone())
    }
}
