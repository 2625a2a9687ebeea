//! Board wiring and firmware tasks
pub mod distance_report;
pub mod obstacle_watch;
pub mod ranging;
pub mod resources;
