pub mod reference_repo;
pub mod schedule_repo;

pub use reference_repo::{DeviceRepo, UnitRepo};
pub use schedule_repo::ScheduleRepo;
