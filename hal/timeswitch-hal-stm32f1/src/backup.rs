//! Backup domain for STM32F1
//!
//! The F1 RTC is a plain 32-bit seconds counter split across CNTH/CNTL,
//! clocked from the 32.768 kHz LSE through a 0x7FFF prescaler. The BKP data
//! registers are 16 bits wide, so each 32-bit slot uses two of them:
//! slot `n` is DR(2n) for the low half and DR(2n+1) for the high half.
//!
//! Writes to the counter go through the RTC configuration mode and wait for
//! RTOFF. Every wait is bounded by [`SPIN_LIMIT`].

use embassy_stm32::pac;
use embassy_stm32::pac::rcc::vals::Rtcsel;
use timeswitch_hal::{BackupDomain, BackupError, BackupSlot};

/// LSE ticks per second minus one
const PRESCALER: u32 = 0x7FFF;

/// Upper bound on register polling loops
pub const SPIN_LIMIT: u32 = 100_000;

/// RTC counter and BKP registers
pub struct RtcBackup {
    synced: bool,
}

impl Default for RtcBackup {
    fn default() -> Self {
        Self::new()
    }
}

impl RtcBackup {
    /// Clock the PWR and BKP blocks
    pub fn new() -> Self {
        pac::RCC.apb1enr().modify(|w| {
            w.set_pwren(true);
            w.set_bkpen(true);
        });
        Self { synced: false }
    }

    /// Wait for the previous RTC register write to finish
    fn wait_write_done(&self) -> bool {
        (0..SPIN_LIMIT).any(|_| pac::RTC.crl().read().rtoff() == pac::rtc::vals::Rtoff::TERMINATED)
    }

    /// Wait for the APB1 view of the RTC registers to resynchronize
    fn wait_synced(&mut self) -> bool {
        if !self.synced {
            pac::RTC.crl().modify(|w| w.set_rsf(false));
            self.synced = (0..SPIN_LIMIT).any(|_| pac::RTC.crl().read().rsf());
        }
        self.synced
    }

    fn read_half(&self, index: usize) -> u32 {
        pac::BKP.dr(index).read().d() as u32
    }

    fn write_half(&self, index: usize, value: u16) {
        pac::BKP.dr(index).write(|w| w.set_d(value));
    }
}

impl BackupDomain for RtcBackup {
    fn enable_oscillator(&mut self) {
        pac::PWR.cr().modify(|w| w.set_dbp(true));
        pac::RCC.bdcr().modify(|w| {
            w.set_lseon(true);
            w.set_rtcsel(Rtcsel::LSE);
            w.set_rtcen(true);
        });
    }

    fn oscillator_ready(&mut self) -> bool {
        pac::RCC.bdcr().read().lserdy() && self.wait_synced()
    }

    fn read_counter(&mut self) -> u32 {
        let high = pac::RTC.cnth().read().cnth() as u32;
        let low = pac::RTC.cntl().read().cntl() as u32;
        high << 16 | low
    }

    fn write_counter(&mut self, value: u32) -> Result<(), BackupError> {
        if !self.wait_write_done() {
            return Err(BackupError::WriteTimeout);
        }
        pac::RTC.crl().modify(|w| w.set_cnf(true));
        pac::RTC.prlh().write(|w| w.set_prlh((PRESCALER >> 16) as u8));
        pac::RTC.prll().write(|w| w.set_prll(PRESCALER as u16));
        pac::RTC.cnth().write(|w| w.set_cnth((value >> 16) as u16));
        pac::RTC.cntl().write(|w| w.set_cntl(value as u16));
        pac::RTC.crl().modify(|w| w.set_cnf(false));
        if self.wait_write_done() {
            Ok(())
        } else {
            Err(BackupError::WriteTimeout)
        }
    }

    fn read_slot(&mut self, slot: BackupSlot) -> u32 {
        let base = slot.index() * 2;
        self.read_half(base + 1) << 16 | self.read_half(base)
    }

    fn write_slot(&mut self, slot: BackupSlot, value: u32) {
        let base = slot.index() * 2;
        self.write_half(base, value as u16);
        self.write_half(base + 1, (value >> 16) as u16);
    }
}
