//! Local user interface
//!
//! Four buttons are sampled by the heartbeat, debounced into [`Key`] events
//! and fed to the [`Menu`], which edits the clock and schedule and draws the
//! character display.

mod debounce;
mod keys;
mod menu;

pub use debounce::Debouncer;
pub use keys::Key;
pub use menu::{Menu, MenuAction, MenuMode, ScheduleField};
