//! Target resolution over the organizational hierarchy.
//!
//! Units form a forest through `parent_id`. A unit selection covers the unit
//! itself, every descendant unit, and every device attached to any of them.
//! Reference data may be malformed (dangling or cyclic parents); traversal
//! tracks visited ids and never loops.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Department,
    Employee,
}

/// A node in the organizational hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    #[serde(default)]
    pub parent_id: Option<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Inactive,
    Idle,
    Active,
    Error,
    Maintenance,
}

/// A speaker device attached to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub unit_id: EntityId,
    pub status: DeviceStatus,
}

// ---------------------------------------------------------------------------
// Closure
// ---------------------------------------------------------------------------

fn children_index(units: &[Unit]) -> HashMap<&str, Vec<&str>> {
    let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
    for unit in units {
        if let Some(parent) = unit.parent_id.as_deref() {
            index.entry(parent).or_default().push(unit.id.as_str());
        }
    }
    index
}

/// `root_unit_id` plus every transitive descendant in `all_units`.
///
/// The root is always included, even if it is not present in `all_units`.
pub fn expand_unit_closure(root_unit_id: &str, all_units: &[Unit]) -> HashSet<EntityId> {
    expand_units_closure([root_unit_id], all_units)
}

/// Union of the closures of every id in `roots`.
pub fn expand_units_closure<'a, I>(roots: I, all_units: &[Unit]) -> HashSet<EntityId>
where
    I: IntoIterator<Item = &'a str>,
{
    let children = children_index(all_units);
    let mut visited: HashSet<EntityId> = HashSet::new();
    let mut queue: VecDeque<&str> = roots.into_iter().collect();

    while let Some(unit_id) = queue.pop_front() {
        if !visited.insert(unit_id.to_string()) {
            continue;
        }
        if let Some(kids) = children.get(unit_id) {
            queue.extend(kids.iter().copied());
        }
    }

    visited
}

/// Ids of the devices whose `unit_id` is in `unit_ids`.
pub fn expand_to_device_ids(unit_ids: &HashSet<EntityId>, all_devices: &[Device]) -> HashSet<EntityId> {
    all_devices
        .iter()
        .filter(|device| unit_ids.contains(&device.unit_id))
        .map(|device| device.id.clone())
        .collect()
}

/// Devices (not just ids) reachable from `root_unit_id`.
pub fn devices_in_unit<'a>(
    root_unit_id: &str,
    all_units: &[Unit],
    all_devices: &'a [Device],
) -> Vec<&'a Device> {
    let closure = expand_unit_closure(root_unit_id, all_units);
    all_devices
        .iter()
        .filter(|device| closure.contains(&device.unit_id))
        .collect()
}

// ---------------------------------------------------------------------------
// Schedule filtering
// ---------------------------------------------------------------------------

/// Returns `true` if `schedule` reaches into the given unit/device closure,
/// either by a targeted unit or by a targeted device.
pub fn schedule_targets_closure(
    schedule: &Schedule,
    unit_closure: &HashSet<EntityId>,
    device_closure: &HashSet<EntityId>,
) -> bool {
    schedule.target_unit_ids.iter().any(|id| unit_closure.contains(id))
        || schedule.target_device_ids.iter().any(|id| device_closure.contains(id))
}

/// Schedules visible from `unit_id`: those targeting the unit, a descendant,
/// or a device inside them, plus whole-system schedules.
pub fn filter_schedules_by_unit<'a>(
    unit_id: &str,
    schedules: &'a [Schedule],
    all_units: &[Unit],
    all_devices: &[Device],
) -> Vec<&'a Schedule> {
    let unit_closure = expand_unit_closure(unit_id, all_units);
    let device_closure = expand_to_device_ids(&unit_closure, all_devices);

    schedules
        .iter()
        .filter(|s| s.is_whole_system() || schedule_targets_closure(s, &unit_closure, &device_closure))
        .collect()
}
