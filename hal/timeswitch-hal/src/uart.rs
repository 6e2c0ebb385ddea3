//! UART serial communication abstractions
//!
//! The console only needs a byte sink. Reception is handled by the firmware's
//! async receive task.

/// Errors from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Other error
    Other,
}

/// UART transmitter
pub trait UartTx {
    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), UartError>;
}

/// Adapter from [`UartTx`] to [`core::fmt::Write`]
///
/// Remembers the last transmit error so callers can log it after formatting.
pub struct UartWriter<'a, T: UartTx> {
    tx: &'a mut T,
    error: Option<UartError>,
}

impl<'a, T: UartTx> UartWriter<'a, T> {
    /// Wrap a transmitter
    pub fn new(tx: &'a mut T) -> Self {
        Self { tx, error: None }
    }

    /// Take the first error seen since the last call
    pub fn take_error(&mut self) -> Option<UartError> {
        self.error.take()
    }

    /// Flush the underlying transmitter
    pub fn flush(&mut self) -> Result<(), UartError> {
        self.tx.flush()
    }
}

impl<T: UartTx> core::fmt::Write for UartWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.tx.write_blocking(s.as_bytes()).map_err(|e| {
            self.error.get_or_insert(e);
            core::fmt::Error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    struct Sink {
        bytes: [u8; 32],
        len: usize,
        fail: bool,
    }

    impl UartTx for Sink {
        fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
            if self.fail {
                return Err(UartError::Overrun);
            }
            self.bytes[self.len..self.len + data.len()].copy_from_slice(data);
            self.len += data.len();
            Ok(())
        }

        fn flush(&mut self) -> Result<(), UartError> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_forwards_bytes() {
        let mut sink = Sink {
            bytes: [0; 32],
            len: 0,
            fail: false,
        };
        let mut writer = UartWriter::new(&mut sink);
        write!(writer, "t={:02}", 7).unwrap();
        assert!(writer.take_error().is_none());
        assert_eq!(&sink.bytes[..sink.len], b"t=07");
    }

    #[test]
    fn test_writer_keeps_error() {
        let mut sink = Sink {
            bytes: [0; 32],
            len: 0,
            fail: true,
        };
        let mut writer = UartWriter::new(&mut sink);
        assert!(writer.write_str("x").is_err());
        assert_eq!(writer.take_error(), Some(UartError::Overrun));
        assert_eq!(writer.take_error(), None);
    }
}
