//! Battery-backed clock store
//!
//! [`ClockStore`] is the single writer of the seconds counter and of the
//! persisted schedule record. Menu and console edits go through it.

pub mod layout;

use embedded_hal::delay::DelayNs;
use timeswitch_hal::{BackupDomain, BackupError, BackupSlot};

use crate::calendar::{from_epoch_seconds, to_epoch_seconds, Date, DateTime, Time};
use crate::config::RtcConfig;
use crate::schedule::Schedule;
use layout::{ScheduleWords, SENTINEL};

/// Reads attempted before accepting a possibly torn counter value
const MAX_READ_ATTEMPTS: u8 = 4;

/// How the clock came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStatus {
    /// Fresh backup domain, defaults seeded
    FirstBoot,
    /// Time and schedule carried over from before the reset
    Restored,
    /// Oscillator never became ready; time is kept in RAM
    Degraded,
}

/// Where the seconds count lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counter {
    Backup,
    Ram(u32),
}

/// Time, date and schedule backed by the battery domain
pub struct ClockStore<B: BackupDomain> {
    backup: B,
    config: RtcConfig,
    counter: Counter,
    schedule: Schedule,
}

impl<B: BackupDomain> ClockStore<B> {
    /// Create a store; call [`init`](Self::init) before reading the time
    pub fn new(backup: B, config: RtcConfig) -> Self {
        Self {
            backup,
            config,
            counter: Counter::Backup,
            schedule: Schedule::new(),
        }
    }

    /// Bring up the oscillator and restore or seed persisted state
    ///
    /// Waits at most `ready_timeout_ms` for the oscillator, polling once per
    /// millisecond. A counter that cannot be seeded is treated like a dead
    /// oscillator.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> BootStatus {
        self.backup.enable_oscillator();

        let mut waited_ms = 0;
        while !self.backup.oscillator_ready() {
            if waited_ms >= self.config.ready_timeout_ms {
                return self.init_degraded();
            }
            delay.delay_ms(1);
            waited_ms += 1;
        }

        self.counter = Counter::Backup;
        if self.backup.read_slot(BackupSlot::Sentinel) != SENTINEL {
            if self.write_counter(self.default_seconds()).is_err() {
                return self.init_degraded();
            }
            self.schedule = Schedule::new();
            for slot in BackupSlot::ALL {
                if slot != BackupSlot::Sentinel {
                    self.backup.write_slot(slot, 0);
                }
            }
            self.backup.write_slot(BackupSlot::Sentinel, SENTINEL);
            BootStatus::FirstBoot
        } else {
            self.refresh_schedule();
            BootStatus::Restored
        }
    }

    fn init_degraded(&mut self) -> BootStatus {
        self.counter = Counter::Ram(self.default_seconds());
        // The data registers do not depend on the oscillator
        if self.backup.read_slot(BackupSlot::Sentinel) == SENTINEL {
            self.refresh_schedule();
        }
        BootStatus::Degraded
    }

    fn default_seconds(&self) -> u32 {
        to_epoch_seconds(&self.config.default_date, &self.config.default_time)
    }

    /// Check whether time is being kept in RAM
    pub fn is_degraded(&self) -> bool {
        matches!(self.counter, Counter::Ram(_))
    }

    /// Advance the RAM counter by one second
    ///
    /// No-op while the hardware counter is running.
    pub fn tick_second(&mut self) {
        if let Counter::Ram(secs) = &mut self.counter {
            *secs = secs.saturating_add(1);
        }
    }

    /// Read the seconds counter
    ///
    /// The hardware counter is read until two consecutive values agree.
    pub fn epoch_seconds(&mut self) -> u32 {
        match self.counter {
            Counter::Ram(secs) => secs,
            Counter::Backup => {
                let mut last = self.backup.read_counter();
                for _ in 0..MAX_READ_ATTEMPTS {
                    let next = self.backup.read_counter();
                    if next == last {
                        break;
                    }
                    last = next;
                }
                last
            }
        }
    }

    fn write_counter(&mut self, secs: u32) -> Result<(), BackupError> {
        match &mut self.counter {
            Counter::Ram(value) => {
                *value = secs;
                Ok(())
            }
            Counter::Backup => self.backup.write_counter(secs),
        }
    }

    /// Current date and time
    pub fn now(&mut self) -> DateTime {
        let secs = self.epoch_seconds();
        self.refresh_schedule();
        from_epoch_seconds(secs)
    }

    /// Current time of day
    pub fn time(&mut self) -> Time {
        self.now().time
    }

    /// Current date
    pub fn date(&mut self) -> Date {
        self.now().date
    }

    /// Set date and time together
    ///
    /// On error the clock keeps its previous time and the schedule record is
    /// not rewritten.
    pub fn set_date_time(&mut self, date: Date, time: Time) -> Result<(), BackupError> {
        self.write_counter(to_epoch_seconds(&date, &time))?;
        if self.schedule.enabled {
            self.persist_schedule();
        }
        Ok(())
    }

    /// Set the time of day, keeping today's date
    pub fn set_time(&mut self, time: Time) -> Result<(), BackupError> {
        let today = self.date();
        self.set_date_time(today, time)
    }

    /// Set the date, keeping the time of day
    pub fn set_date(&mut self, date: Date) -> Result<(), BackupError> {
        let time = self.time();
        self.set_date_time(date, time)
    }

    /// Current schedule
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Change the schedule and write it through to the backup slots
    pub fn update_schedule<F: FnOnce(&mut Schedule)>(&mut self, f: F) -> Schedule {
        f(&mut self.schedule);
        self.persist_schedule();
        self.schedule
    }

    fn persist_schedule(&mut self) {
        let words = layout::encode(&self.schedule);
        self.backup.write_slot(BackupSlot::ScheduleOn, words.on);
        self.backup.write_slot(BackupSlot::ScheduleOff, words.off);
        self.backup.write_slot(BackupSlot::ScheduleMeta, words.meta);
    }

    fn refresh_schedule(&mut self) {
        let words = ScheduleWords {
            on: self.backup.read_slot(BackupSlot::ScheduleOn),
            off: self.backup.read_slot(BackupSlot::ScheduleOff),
            meta: self.backup.read_slot(BackupSlot::ScheduleMeta),
        };
        if let Some(schedule) = layout::decode(&words) {
            self.schedule = schedule;
        }
    }

    /// Release the backup domain
    pub fn release(self) -> B {
        self.backup
    }
}
