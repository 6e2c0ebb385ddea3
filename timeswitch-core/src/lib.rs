//! Board-agnostic core logic for the timeswitch clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Calendar arithmetic over epoch seconds
//! - Battery-backed clock store and schedule persistence
//! - Schedule evaluation and output edges
//! - Button debouncing and the edit menu
//! - Console command execution
//! - Heartbeat divisors and configuration

#![no_std]
#![deny(unsafe_code)]

pub mod calendar;
pub mod clock;
pub mod config;
pub mod console;
pub mod controller;
pub mod input;
pub mod schedule;
pub mod tick;

pub use calendar::{Date, DateTime, Time};
pub use clock::{BootStatus, ClockStore};
pub use config::ClockConfig;
pub use controller::{Controller, OutputError};
