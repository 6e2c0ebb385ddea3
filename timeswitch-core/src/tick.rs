//! Fixed-rate heartbeat
//!
//! One beat per base tick (1 ms on the stock board). The heartbeat divides
//! it into button scans, display refreshes and whole seconds.

use crate::config::TickConfig;

/// Work due on a beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickActions {
    /// Sample the buttons
    pub scan: bool,
    /// Redraw the display and evaluate the schedule
    pub refresh: bool,
    /// A second has elapsed
    pub second: bool,
}

/// Beat counter
#[derive(Debug, Clone)]
pub struct Heartbeat {
    config: TickConfig,
    count: u16,
}

impl Heartbeat {
    /// Create a heartbeat
    ///
    /// An inconsistent configuration falls back to the defaults.
    pub fn new(config: TickConfig) -> Self {
        let config = if config.is_valid() {
            config
        } else {
            TickConfig::default()
        };
        Self { config, count: 0 }
    }

    /// Beats since the last wrap
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Advance by one beat
    pub fn beat(&mut self) -> TickActions {
        self.count += 1;

        let actions = TickActions {
            scan: self.count % self.config.scan_every == 0,
            refresh: self.count % self.config.refresh_every == 0,
            second: self.count >= self.config.wrap_at,
        };

        if actions.second {
            self.count = 0;
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let mut heartbeat = Heartbeat::new(TickConfig::default());
        let mut scans = 0;
        let mut refresh_beats = heapless::Vec::<u16, 4>::new();
        let mut seconds = 0;

        for beat in 1..=1000u16 {
            let actions = heartbeat.beat();
            assert_eq!(actions.scan, beat % 10 == 0, "beat {}", beat);
            if actions.scan {
                scans += 1;
            }
            if actions.refresh {
                refresh_beats.push(beat).unwrap();
            }
            if actions.second {
                seconds += 1;
            }
        }

        assert_eq!(scans, 100);
        assert_eq!(refresh_beats.as_slice(), &[500, 1000]);
        assert_eq!(seconds, 1);
        assert_eq!(heartbeat.count(), 0);
    }

    #[test]
    fn test_counter_wraps() {
        let mut heartbeat = Heartbeat::new(TickConfig::default());
        for _ in 0..1003 {
            heartbeat.beat();
        }
        assert_eq!(heartbeat.count(), 3);
    }

    #[test]
    fn test_invalid_config_uses_defaults() {
        let mut heartbeat = Heartbeat::new(TickConfig {
            scan_every: 0,
            refresh_every: 500,
            wrap_at: 1000,
        });
        for _ in 0..9 {
            assert!(!heartbeat.beat().scan);
        }
        assert!(heartbeat.beat().scan);
    }

    #[test]
    fn test_short_wrap_keeps_real_seconds() {
        let mut heartbeat = Heartbeat::new(TickConfig {
            scan_every: 10,
            refresh_every: 250,
            wrap_at: 500,
        });
        let seconds = (0..1000).filter(|_| heartbeat.beat().second).count();
        assert_eq!(seconds, 1);
    }
}
