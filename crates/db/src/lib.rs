//! Schedule storage and the mutation layer.
//!
//! The store is an in-memory snapshot of schedules plus read-only reference
//! data (units, devices). Every status-changing write goes through
//! [`repositories::ScheduleRepo`], which re-reads the current status under
//! the write lock before applying it.

pub mod models;
pub mod repositories;

use std::path::Path;
use std::sync::Arc;

use broadcast_core::schedule::Schedule;
use broadcast_core::targeting::{Device, Unit};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Shared handle to the store. Cheap to clone.
pub type DbPool = Arc<Store>;

/// Initial contents of the store, as loaded from a seed file.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Schedules in insertion order plus immutable reference data.
#[derive(Debug)]
pub struct Store {
    pub(crate) schedules: RwLock<Vec<Schedule>>,
    pub(crate) units: Vec<Unit>,
    pub(crate) devices: Vec<Device>,
}

/// Build a store from `seed`.
pub fn create_pool(seed: Seed) -> DbPool {
    tracing::debug!(
        schedules = seed.schedules.len(),
        units = seed.units.len(),
        devices = seed.devices.len(),
        "Creating schedule store"
    );

    Arc::new(Store {
        schedules: RwLock::new(seed.schedules),
        units: seed.units,
        devices: seed.devices,
    })
}

/// Parse a JSON seed file of the form `{ "schedules": [], "units": [], "devices": [] }`.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Seed, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Number of stored schedules, reported by the health endpoint.
pub async fn schedule_count(pool: &DbPool) -> usize {
    pool.schedules.read().await.len()
}
