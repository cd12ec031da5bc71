//! Read-only access to units and devices.

use std::collections::HashSet;

use broadcast_core::targeting::{devices_in_unit, expand_unit_closure, Device, Unit};
use broadcast_core::types::EntityId;

use crate::DbPool;

/// Queries over the organizational hierarchy.
pub struct UnitRepo;

impl UnitRepo {
    pub fn list(pool: &DbPool) -> &[Unit] {
        &pool.units
    }

    pub fn find_by_id<'a>(pool: &'a DbPool, id: &str) -> Option<&'a Unit> {
        pool.units.iter().find(|u| u.id == id)
    }

    /// `id` plus every descendant unit id.
    pub fn closure(pool: &DbPool, id: &str) -> HashSet<EntityId> {
        expand_unit_closure(id, &pool.units)
    }
}

/// Queries over speaker devices.
pub struct DeviceRepo;

impl DeviceRepo {
    pub fn list(pool: &DbPool) -> &[Device] {
        &pool.devices
    }

    /// Devices attached to `unit_id` or any of its descendants.
    pub fn list_in_unit<'a>(pool: &'a DbPool, unit_id: &str) -> Vec<&'a Device> {
        devices_in_unit(unit_id, &pool.units, &pool.devices)
    }
}
