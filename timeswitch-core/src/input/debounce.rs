//! Button debouncing
//!
//! A mask must stay unchanged for `threshold` consecutive samples before it
//! counts. One key event is produced per press; the latch is released as
//! soon as every button reads up.

use super::keys::Key;

/// Debounces raw button masks into key events
#[derive(Debug, Clone)]
pub struct Debouncer {
    threshold: u16,
    last_mask: u8,
    stable: u16,
    latched: bool,
}

impl Debouncer {
    /// Create a debouncer
    ///
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold: threshold.max(1),
            last_mask: 0,
            stable: 0,
            latched: false,
        }
    }

    /// Feed one raw sample (bit set = pressed)
    pub fn sample(&mut self, mask: u8) -> Option<Key> {
        let mut event = None;

        if mask != self.last_mask {
            self.stable = 0;
            self.last_mask = mask;
        } else if self.stable < self.threshold {
            self.stable += 1;
            if self.stable == self.threshold && mask != 0 && !self.latched {
                self.latched = true;
                event = Key::from_mask(mask);
            }
        }

        if mask == 0 {
            self.latched = false;
        }

        event
    }

    /// Check whether a press has been reported and not yet released
    pub fn is_latched(&self) -> bool {
        self.latched
    }
}
