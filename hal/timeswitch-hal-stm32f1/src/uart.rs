//! USART console transmitter for STM32F1

use embassy_stm32::usart::{BufferedUartTx, Error as UsartError};
use embedded_io::Write;
use timeswitch_hal::{UartError, UartTx};

/// Error from USART operations
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too small
    BufferTooSmall,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooSmall,
            _ => UartBusError::Other,
        }
    }
}

impl From<UartBusError> for UartError {
    fn from(e: UartBusError) -> Self {
        match e {
            UartBusError::Framing => UartError::Framing,
            UartBusError::Noise => UartError::Noise,
            UartBusError::Overrun => UartError::Overrun,
            UartBusError::Parity => UartError::Parity,
            UartBusError::BufferTooSmall | UartBusError::Other => UartError::Other,
        }
    }
}

fn map_error(e: UsartError) -> UartError {
    UartBusError::from(e).into()
}

/// Console transmit half
///
/// Writes block only while the TX ring buffer is full.
pub struct ConsoleTx<'d> {
    tx: BufferedUartTx<'d>,
}

impl<'d> ConsoleTx<'d> {
    pub fn new(tx: BufferedUartTx<'d>) -> Self {
        Self { tx }
    }
}

impl UartTx for ConsoleTx<'_> {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
        self.tx.write_all(data).map_err(map_error)
    }

    fn flush(&mut self) -> Result<(), UartError> {
        Write::flush(&mut self.tx).map_err(map_error)
    }
}
