//! Line assembly for the serial console.
//!
//! Bytes are fed one at a time from the receive path:
//! - printable ASCII is appended (up to [`LINE_CAPACITY`])
//! - CR or LF finalizes a non-empty line and raises the ready flag
//! - BS (0x08) or DEL (0x7F) removes the last byte
//!
//! While a line is ready, further bytes are dropped until the dispatcher
//! calls [`LineBuffer::clear`].

use heapless::Vec;

/// Maximum line length in bytes
pub const LINE_CAPACITY: usize = 64;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// Byte appended; echo it back
    Stored(u8),
    /// Last byte removed; echo the erase sequence
    Erased,
    /// Line terminated; a complete line is ready for dispatch
    Ready,
    /// Byte dropped (control byte, full buffer, empty line, or line pending)
    Ignored,
}

impl Feed {
    /// Bytes the transport should send back to the terminal
    pub fn echo(&self) -> &'static [u8] {
        static PRINTABLE: [u8; 95] = {
            let mut table = [0u8; 95];
            let mut i = 0;
            while i < 95 {
                table[i] = b' ' + i as u8;
                i += 1;
            }
            table
        };

        match self {
            Feed::Stored(byte) if (b' '..=b'~').contains(byte) => {
                core::slice::from_ref(&PRINTABLE[(*byte - b' ') as usize])
            }
            Feed::Stored(_) => &[],
            Feed::Erased => b"\x08 \x08",
            Feed::Ready => b"\r\n",
            Feed::Ignored => &[],
        }
    }
}

/// Bounded command line with a ready flag
#[derive(Debug, Clone)]
pub struct LineBuffer {
    buffer: Vec<u8, LINE_CAPACITY>,
    ready: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            ready: false,
        }
    }

    /// Feed a single received byte
    pub fn feed(&mut self, byte: u8) -> Feed {
        if self.ready {
            return Feed::Ignored;
        }

        match byte {
            b'\r' | b'\n' => {
                if self.buffer.is_empty() {
                    Feed::Ignored
                } else {
                    self.ready = true;
                    Feed::Ready
                }
            }
            BACKSPACE | DELETE => {
                if self.buffer.pop().is_some() {
                    Feed::Erased
                } else {
                    Feed::Ignored
                }
            }
            b' '..=b'~' => match self.buffer.push(byte) {
                Ok(()) => Feed::Stored(byte),
                Err(_) => Feed::Ignored,
            },
            _ => Feed::Ignored,
        }
    }

    /// Check if a complete line is waiting for dispatch
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Get the completed line, if one is ready
    pub fn line(&self) -> Option<&str> {
        if !self.ready {
            return None;
        }
        // Only printable ASCII is ever stored
        core::str::from_utf8(&self.buffer).ok()
    }

    /// Number of bytes currently buffered
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Discard the buffered line and clear the ready flag
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(line: &mut LineBuffer, bytes: &[u8]) {
        for &b in bytes {
            line.feed(b);
        }
    }

    #[test]
    fn test_line_completes_on_cr() {
        let mut line = LineBuffer::new();
        feed_all(&mut line, b"status");
        assert!(!line.is_ready());
        assert_eq!(line.line(), None);

        assert_eq!(line.feed(b'\r'), Feed::Ready);
        assert!(line.is_ready());
        assert_eq!(line.line(), Some("status"));
    }

    #[test]
    fn test_empty_lines_ignored() {
        let mut line = LineBuffer::new();
        assert_eq!(line.feed(b'\r'), Feed::Ignored);
        assert_eq!(line.feed(b'\n'), Feed::Ignored);
        assert!(!line.is_ready());
    }

    #[test]
    fn test_crlf_yields_one_line() {
        let mut line = LineBuffer::new();
        feed_all(&mut line, b"help\r");
        assert_eq!(line.feed(b'\n'), Feed::Ignored);
        assert_eq!(line.line(), Some("help"));

        line.clear();
        // The LF left over from CRLF must not produce an empty command
        assert_eq!(line.feed(b'\n'), Feed::Ignored);
        assert!(!line.is_ready());
    }

    #[test]
    fn test_backspace_edits() {
        let mut line = LineBuffer::new();
        feed_all(&mut line, b"statux");
        assert_eq!(line.feed(0x08), Feed::Erased);
        assert_eq!(line.feed(b's'), Feed::Stored(b's'));
        line.feed(b'\n');
        assert_eq!(line.line(), Some("status"));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut line = LineBuffer::new();
        assert_eq!(line.feed(0x7F), Feed::Ignored);
        assert!(line.is_empty());
    }

    #[test]
    fn test_overflow_drops_bytes() {
        let mut line = LineBuffer::new();
        for _ in 0..LINE_CAPACITY {
            assert!(matches!(line.feed(b'a'), Feed::Stored(b'a')));
        }
        assert_eq!(line.feed(b'b'), Feed::Ignored);
        assert_eq!(line.len(), LINE_CAPACITY);
    }

    #[test]
    fn test_bytes_dropped_while_ready() {
        let mut line = LineBuffer::new();
        feed_all(&mut line, b"help\n");
        assert_eq!(line.feed(b'x'), Feed::Ignored);
        assert_eq!(line.line(), Some("help"));

        line.clear();
        assert_eq!(line.feed(b'x'), Feed::Stored(b'x'));
    }

    #[test]
    fn test_control_bytes_ignored() {
        let mut line = LineBuffer::new();
        assert_eq!(line.feed(0x1B), Feed::Ignored);
        assert_eq!(line.feed(0xC3), Feed::Ignored);
        assert!(line.is_empty());
    }

    #[test]
    fn test_echo_bytes() {
        assert_eq!(Feed::Stored(b'a').echo(), b"a");
        assert_eq!(Feed::Stored(b'~').echo(), b"~");
        assert_eq!(Feed::Erased.echo(), b"\x08 \x08");
        assert_eq!(Feed::Ready.echo(), b"\r\n");
        assert!(Feed::Ignored.echo().is_empty());
    }
}
