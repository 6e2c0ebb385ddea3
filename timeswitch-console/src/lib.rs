//! Serial console protocol
//!
//! This crate defines the plain-text line interface of the clock. Bytes from
//! the UART are assembled into lines by [`LineBuffer`], and complete lines are
//! tokenized into a closed set of [`Command`]s with typed arguments.
//!
//! # Line discipline
//!
//! ```text
//! "set time 13:45:02\r"   -> Command::SetTime(Hms { 13, 45, 2 })
//! "schedule date 1:6:25\n" -> Command::ScheduleDate(Dmy { 1, 6, 25 })
//! "status\r"              -> Command::Status
//! ```
//!
//! The clock logic that executes commands lives in `timeswitch-core`.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{ArgumentKind, Command, CommandError, Dmy, Hms, HELP_TEXT};
pub use line::{Feed, LineBuffer, LINE_CAPACITY};
