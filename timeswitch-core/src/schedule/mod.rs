//! Device schedule
//!
//! A [`Schedule`] is a single on/off window, optionally tied to one calendar
//! date. [`ScheduleEngine`] evaluates it against the clock and drives the
//! device and indicator outputs on state edges only.

mod engine;
mod record;

pub use engine::ScheduleEngine;
pub use record::{DeviceState, Schedule, Transition};
