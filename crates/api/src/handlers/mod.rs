pub mod conflicts;
pub mod reference;
pub mod schedules;
