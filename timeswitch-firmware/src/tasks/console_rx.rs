//! Console UART receive task
//!
//! Assembles command lines byte by byte, echoes them and hands complete
//! lines to the controller. Never touches the clock or the schedule.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_stm32::usart::BufferedUartRx;
use embedded_io_async::Read;

use timeswitch_console::{Feed, LineBuffer};
use timeswitch_hal::UartTx;

use crate::channels::{Line, SharedTx, LINE_CHANNEL, LINE_DONE};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Console RX task
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx<'static>, tx: &'static SharedTx, echo: bool) {
    info!("Console RX task started");

    let mut line = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let event = select(rx.read(&mut buf), LINE_DONE.wait()).await;
        match event {
            Either::First(Ok(n)) => {
                for &byte in &buf[..n] {
                    let feed = line.feed(byte);
                    if echo {
                        send_echo(tx, feed).await;
                    }
                    if feed == Feed::Ready && !forward(&line) {
                        line.clear();
                    }
                }
            }
            Either::First(Err(e)) => {
                warn!("UART read error: {:?}", e);
            }
            Either::Second(()) => {
                trace!("Line dispatched");
                line.clear();
            }
        }
    }
}

async fn send_echo(tx: &SharedTx, feed: Feed) {
    let bytes = feed.echo();
    if bytes.is_empty() {
        return;
    }
    let mut tx = tx.lock().await;
    if let Err(e) = tx.write_blocking(bytes) {
        warn!("Echo failed: {:?}", e);
    }
}

/// Hand a ready line to the controller
///
/// Returns false when the line was dropped and nobody will signal
/// [`LINE_DONE`] for it.
fn forward(buffer: &LineBuffer) -> bool {
    let Some(owned) = buffer.line().and_then(|text| Line::try_from(text).ok()) else {
        return false;
    };
    debug!("Line: {}", owned.as_str());
    if LINE_CHANNEL.try_send(owned).is_err() {
        warn!("Line channel full, dropping line");
        return false;
    }
    true
}
