//! Timetable resolution and free-period task scheduling for a teacher's
//! weekly planner.

pub mod config;
pub mod core;
pub mod errors;
pub mod extensions;
pub mod logging;
pub mod scheduler;
