//! Main controller task
//!
//! Sole owner of the clock controller. Keys, heartbeat events and console
//! lines are handled one at a time, so every mutation of the clock, the
//! schedule and the device output is serialized here.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::Delay;

use timeswitch_core::{BootStatus, OutputError};
use timeswitch_hal::{UartTx, UartWriter};

use crate::board::{Clock, Display};
use crate::channels::{Beat, SharedTx, BEAT_CHANNEL, KEY_CHANNEL, LINE_CHANNEL, LINE_DONE};

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut clock: Clock, mut display: Display, tx: &'static SharedTx) {
    info!("Controller task started");

    {
        let mut tx = tx.lock().await;
        let mut out = UartWriter::new(&mut *tx);
        match clock.boot(&mut Delay, &mut display, &mut out) {
            Ok(BootStatus::FirstBoot) => info!("Backup domain initialized with defaults"),
            Ok(BootStatus::Restored) => info!("Clock restored from backup domain"),
            Ok(BootStatus::Degraded) => {
                warn!("RTC oscillator not ready, keeping time in RAM")
            }
            Err(e) => report(e, &mut out),
        }
    }
    info!("Boot complete, device {}", clock.device_state().label());

    loop {
        match select3(
            KEY_CHANNEL.receive(),
            BEAT_CHANNEL.receive(),
            LINE_CHANNEL.receive(),
        )
        .await
        {
            Either3::First(key) => {
                debug!("Key {:?}", key);
                let mut tx = tx.lock().await;
                let mut out = UartWriter::new(&mut *tx);
                match clock.on_key(key, &mut display, &mut out) {
                    Ok(action) => trace!("Menu action {:?}", action),
                    Err(e) => report(e, &mut out),
                }
            }
            Either3::Second(Beat::Refresh) => {
                let mut tx = tx.lock().await;
                let mut out = UartWriter::new(&mut *tx);
                match clock.on_refresh(&mut display, &mut out) {
                    Ok(Some(state)) => info!("Device switched {}", state.label()),
                    Ok(None) => {}
                    Err(e) => report(e, &mut out),
                }
            }
            Either3::Second(Beat::Second) => clock.on_second(),
            Either3::Third(line) => {
                let mut tx = tx.lock().await;
                let mut out = UartWriter::new(&mut *tx);
                match clock.on_command(&line, &mut out) {
                    Ok(Some(command)) if command.is_mutating() => {
                        info!("Applied {:?}", command)
                    }
                    Ok(_) => {}
                    Err(e) => report(e, &mut out),
                }
                if let Err(e) = out.flush() {
                    warn!("Console flush failed: {:?}", e);
                }
                LINE_DONE.signal(());
            }
        }
    }
}

/// Log an output or clock write failure
fn report<T: UartTx>(error: OutputError, out: &mut UartWriter<'_, T>) {
    match error {
        OutputError::Display(e) => warn!("Display write failed: {:?}", e),
        OutputError::Console => match out.take_error() {
            Some(e) => warn!("Console write failed: {:?}", e),
            None => warn!("Console write failed"),
        },
        OutputError::Backup(e) => warn!("RTC counter write failed: {:?}", e),
    }
}
