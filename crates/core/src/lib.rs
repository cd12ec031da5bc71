//! Domain logic for the broadcast schedule console.
//!
//! Everything in this crate is a pure function over caller-supplied
//! snapshots of schedules, units and devices. There is no I/O and no
//! ambient state, so the repository layer, the HTTP gate and any future
//! dispatch daemon all share the same rules.

pub mod actions;
pub mod aggregation;
pub mod conflict;
pub mod error;
pub mod lifecycle;
pub mod schedule;
pub mod targeting;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
