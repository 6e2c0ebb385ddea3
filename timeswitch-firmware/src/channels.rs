//! Inter-task communication channels
//!
//! Defines the static channels used between Embassy tasks. Only the
//! controller task consumes them.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use heapless::String;

use timeswitch_console::LINE_CAPACITY;
use timeswitch_core::input::Key;
use timeswitch_hal_stm32f1::ConsoleTx;

/// Channel capacity for debounced key presses
const KEY_CHANNEL_SIZE: usize = 4;

/// Channel capacity for heartbeat events
const BEAT_CHANNEL_SIZE: usize = 4;

/// Periodic work raised by the heartbeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Beat {
    /// Evaluate the schedule and redraw
    Refresh,
    /// A second has elapsed
    Second,
}

/// A completed console line
pub type Line = String<LINE_CAPACITY>;

/// Debounced key presses from the heartbeat task
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, Key, KEY_CHANNEL_SIZE> = Channel::new();

/// Refresh and second events from the heartbeat task
pub static BEAT_CHANNEL: Channel<CriticalSectionRawMutex, Beat, BEAT_CHANNEL_SIZE> =
    Channel::new();

/// Completed lines from the console receive task
///
/// Holds at most one line; the receive task waits for [`LINE_DONE`] before
/// accepting the next.
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, 1> = Channel::new();

/// Signal that the controller finished dispatching a line
pub static LINE_DONE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Console transmitter shared by echo and replies
pub type SharedTx = Mutex<CriticalSectionRawMutex, ConsoleTx<'static>>;
