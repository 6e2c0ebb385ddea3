//! Host stand-ins for the hardware traits

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use timeswitch_hal::backup::SLOT_COUNT;
use timeswitch_hal::display::{COLS, ROWS};
use timeswitch_hal::{
    BackupDomain, BackupError, BackupSlot, CharDisplay, DisplayError, OutputPin,
};

/// Backup domain kept in memory
#[derive(Debug, Clone)]
pub struct MemoryDomain {
    pub oscillator_works: bool,
    /// When false every counter write times out
    pub counter_writable: bool,
    pub counter: u32,
    pub slots: [u32; SLOT_COUNT],
    pub slot_writes: u32,
}

impl MemoryDomain {
    pub fn blank() -> Self {
        Self {
            oscillator_works: true,
            counter_writable: true,
            counter: 0,
            slots: [0; SLOT_COUNT],
            slot_writes: 0,
        }
    }

    /// Simulate time passing while the board is off
    pub fn advance(&mut self, secs: u32) {
        self.counter += secs;
    }
}

impl BackupDomain for MemoryDomain {
    fn enable_oscillator(&mut self) {}

    fn oscillator_ready(&mut self) -> bool {
        self.oscillator_works
    }

    fn read_counter(&mut self) -> u32 {
        self.counter
    }

    fn write_counter(&mut self, value: u32) -> Result<(), BackupError> {
        if !self.counter_writable {
            return Err(BackupError::WriteTimeout);
        }
        self.counter = value;
        Ok(())
    }

    fn read_slot(&mut self, slot: BackupSlot) -> u32 {
        self.slots[slot.index()]
    }

    fn write_slot(&mut self, slot: BackupSlot, value: u32) {
        self.slots[slot.index()] = value;
        self.slot_writes += 1;
    }
}

/// Output pin that counts writes
#[derive(Debug, Default)]
pub struct TestPin {
    pub high: bool,
    pub writes: u32,
}

impl OutputPin for TestPin {
    fn set_high(&mut self) {
        self.high = true;
        self.writes += 1;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.writes += 1;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// 2x16 character grid
#[derive(Debug)]
pub struct TestDisplay {
    pub cells: [[u8; COLS as usize]; ROWS as usize],
    pub cursor: (u8, u8),
    pub cursor_visible: bool,
    pub fail: bool,
}

impl TestDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLS as usize]; ROWS as usize],
            cursor: (0, 0),
            cursor_visible: false,
            fail: false,
        }
    }

    /// Row contents without trailing padding
    pub fn row(&self, row: usize) -> &str {
        core::str::from_utf8(&self.cells[row]).unwrap().trim_end()
    }
}

impl CharDisplay for TestDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        self.cells = [[b' '; COLS as usize]; ROWS as usize];
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::OutOfBounds);
        }
        self.cursor = (row, col);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        for b in text.bytes() {
            let (row, col) = self.cursor;
            if col < COLS {
                self.cells[row as usize][col as usize] = b;
                self.cursor = (row, col + 1);
            }
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.cursor_visible = visible;
        Ok(())
    }
}

/// Delay that returns immediately and records the total requested
#[derive(Debug, Default)]
pub struct NoDelay {
    pub total_ms: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += (ns / 1_000_000) as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms as u64;
    }
}
