//! Heartbeat task
//!
//! Runs the 1 ms base tick:
//! - button scan and debounce
//! - display refresh events
//! - whole seconds for the RAM clock fallback

use defmt::*;
use embassy_time::{Duration, Ticker};

use timeswitch_core::config::{InputConfig, TickConfig};
use timeswitch_core::input::Debouncer;
use timeswitch_core::tick::Heartbeat;
use timeswitch_hal::ButtonBank;

use crate::board::Buttons;
use crate::channels::{Beat, BEAT_CHANNEL, KEY_CHANNEL};

/// Base tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1;

/// Heartbeat task - never blocks beyond the ticker
#[embassy_executor::task]
pub async fn heartbeat_task(mut buttons: Buttons, tick: TickConfig, input: InputConfig) {
    info!("Heartbeat task started");

    let mut heartbeat = Heartbeat::new(tick);
    let mut debouncer = Debouncer::new(input.debounce_samples);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        let actions = heartbeat.beat();

        if actions.scan {
            if let Some(key) = debouncer.sample(buttons.read_raw_mask()) {
                trace!("Key {:?}", key);
                if KEY_CHANNEL.try_send(key).is_err() {
                    warn!("Key channel full, dropping {:?}", key);
                }
            }
        }

        if actions.second && BEAT_CHANNEL.try_send(Beat::Second).is_err() {
            warn!("Beat channel full, dropping second");
        }

        if actions.refresh && BEAT_CHANNEL.try_send(Beat::Refresh).is_err() {
            trace!("Beat channel full, skipping refresh");
        }
    }
}
