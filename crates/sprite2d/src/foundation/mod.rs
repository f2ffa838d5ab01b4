//! Foundation utilities shared by all subsystems

pub mod handle;
pub mod logging;
pub mod math;
pub mod time;
