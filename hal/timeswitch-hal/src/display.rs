//! Character display abstraction
//!
//! A 2-row, 16-column character LCD. Rendering policy lives in the core;
//! implementations only move the cursor and put characters.

/// Display rows
pub const ROWS: u8 = 2;

/// Display columns
pub const COLS: u8 = 16;

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Position outside the character grid
    OutOfBounds,
}

/// Character display driver
pub trait CharDisplay {
    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `row`: Row number (0-1)
    /// - `col`: Column number (0-15)
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Write ASCII text at the cursor
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Show or hide the cursor marker
    ///
    /// Displays without a visible cursor can ignore this.
    fn set_cursor_visible(&mut self, _visible: bool) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Helper for writing a full row
pub trait CharDisplayExt: CharDisplay {
    /// Write `text` at the start of `row`, padding with spaces to the full width
    fn write_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS {
            return Err(DisplayError::OutOfBounds);
        }
        let mut buf = [b' '; COLS as usize];
        let bytes = text.as_bytes();
        let len = bytes.len().min(COLS as usize);
        buf[..len].copy_from_slice(&bytes[..len]);

        self.set_cursor(row, 0)?;
        self.write_str(core::str::from_utf8(&buf).unwrap_or(""))
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay> CharDisplayExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Grid {
        cells: [[u8; COLS as usize]; ROWS as usize],
        row: u8,
        col: u8,
    }

    impl CharDisplay for Grid {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.cells = [[b' '; COLS as usize]; ROWS as usize];
            self.set_cursor(0, 0)
        }

        fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
            if row >= ROWS || col >= COLS {
                return Err(DisplayError::OutOfBounds);
            }
            self.row = row;
            self.col = col;
            Ok(())
        }

        fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
            for b in text.bytes() {
                if self.col < COLS {
                    self.cells[self.row as usize][self.col as usize] = b;
                    self.col += 1;
                }
            }
            Ok(())
        }
    }

    fn grid() -> Grid {
        Grid {
            cells: [[b'#'; COLS as usize]; ROWS as usize],
            row: 0,
            col: 0,
        }
    }

    #[test]
    fn test_write_row_pads() {
        let mut g = grid();
        g.write_row(1, "Time:12:00:00").unwrap();
        assert_eq!(&g.cells[1], b"Time:12:00:00   ");
        assert_eq!(g.cells[0][0], b'#');
    }

    #[test]
    fn test_write_row_truncates() {
        let mut g = grid();
        g.write_row(0, "0123456789abcdefXYZ").unwrap();
        assert_eq!(&g.cells[0], b"0123456789abcdef");
    }

    #[test]
    fn test_write_row_out_of_bounds() {
        let mut g = grid();
        assert_eq!(g.write_row(2, "x"), Err(DisplayError::OutOfBounds));
    }
}
