//! Backup domain abstractions
//!
//! The backup domain is the part of the chip that keeps running from the
//! coin cell when main power is gone: a free-running seconds counter clocked
//! by a 32.768 kHz oscillator, and a handful of data registers.

/// Number of 32-bit backup slots the core relies on
pub const SLOT_COUNT: usize = 5;

/// Backup data slots
///
/// Each slot holds one 32-bit word that survives power loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BackupSlot {
    /// Marks a backup domain that has been initialized at least once
    Sentinel = 0,
    /// Schedule on-time and day of the schedule date
    ScheduleOn = 1,
    /// Schedule off-time and month of the schedule date
    ScheduleOff = 2,
    /// Schedule year, valid marker and enabled flag
    ScheduleMeta = 3,
    /// Reserved for future use
    Reserved4 = 4,
}

impl BackupSlot {
    /// All slots, in index order
    pub const ALL: [BackupSlot; SLOT_COUNT] = [
        BackupSlot::Sentinel,
        BackupSlot::ScheduleOn,
        BackupSlot::ScheduleOff,
        BackupSlot::ScheduleMeta,
        BackupSlot::Reserved4,
    ];

    /// Get the slot index
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Errors from the backup domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackupError {
    /// The counter did not accept the write within the bounded wait
    WriteTimeout,
}

/// Battery-backed counter and registers
///
/// Implementations must make `write_counter` complete before returning, or
/// report [`BackupError::WriteTimeout`] if the hardware never acknowledges it.
/// `read_counter` may observe a torn value while the counter carries from the
/// low half-word into the high half-word; callers compensate by reading
/// until two consecutive reads agree.
pub trait BackupDomain {
    /// Start the low-speed oscillator that clocks the counter
    ///
    /// Also unlocks write access to the domain. Must not block.
    fn enable_oscillator(&mut self);

    /// Check whether the oscillator is running and the counter is usable
    fn oscillator_ready(&mut self) -> bool;

    /// Read the seconds counter
    fn read_counter(&mut self) -> u32;

    /// Write the seconds counter
    fn write_counter(&mut self, value: u32) -> Result<(), BackupError>;

    /// Read a backup data slot
    fn read_slot(&mut self, slot: BackupSlot) -> u32;

    /// Write a backup data slot
    fn write_slot(&mut self, slot: BackupSlot, value: u32);
}
