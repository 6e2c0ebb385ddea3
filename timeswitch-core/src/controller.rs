//! Application controller
//!
//! Owns the clock store, the schedule engine and the menu. All mutation of
//! time, schedule and device state goes through one `Controller`, so edits
//! from the buttons and from the console are serialized by its owner.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;
use timeswitch_console::Command;
use timeswitch_hal::{
    BackupDomain, BackupError, CharDisplay, CharDisplayExt, DisplayError, OutputPin,
};

use crate::calendar::DateTime;
use crate::clock::{BootStatus, ClockStore};
use crate::config::ClockConfig;
use crate::console;
use crate::input::{Key, Menu, MenuAction, MenuMode};
use crate::schedule::{DeviceState, ScheduleEngine};

/// Controller failures
///
/// Display and console errors occur after the state change was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Character display rejected a write
    Display(DisplayError),
    /// Console transport failed
    Console,
    /// RTC counter write did not complete; the clock keeps its previous time
    Backup(BackupError),
}

impl From<DisplayError> for OutputError {
    fn from(e: DisplayError) -> Self {
        OutputError::Display(e)
    }
}

impl From<BackupError> for OutputError {
    fn from(e: BackupError) -> Self {
        OutputError::Backup(e)
    }
}

impl From<fmt::Error> for OutputError {
    fn from(_: fmt::Error) -> Self {
        OutputError::Console
    }
}

/// Board-agnostic application
pub struct Controller<B: BackupDomain, D: OutputPin, L: OutputPin> {
    config: ClockConfig,
    clock: ClockStore<B>,
    engine: ScheduleEngine<D, L>,
    menu: Menu,
}

impl<B: BackupDomain, D: OutputPin, L: OutputPin> Controller<B, D, L> {
    /// Create the controller; the device and indicator are switched off
    pub fn new(backup: B, device: D, indicator: L, config: ClockConfig) -> Self {
        Self {
            clock: ClockStore::new(backup, config.clock),
            engine: ScheduleEngine::new(device, indicator),
            menu: Menu::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn clock(&mut self) -> &mut ClockStore<B> {
        &mut self.clock
    }

    pub fn device_state(&self) -> DeviceState {
        self.engine.state()
    }

    pub fn menu_mode(&self) -> MenuMode {
        self.menu.mode()
    }

    /// Start the clock, show the splash screen and greet the console
    ///
    /// The clock is initialized and the schedule applied even when output
    /// fails.
    pub fn boot<T: DelayNs, C: CharDisplay, W: Write>(
        &mut self,
        delay: &mut T,
        display: &mut C,
        out: &mut W,
    ) -> Result<BootStatus, OutputError> {
        let status = self.clock.init(delay);
        self.evaluate();

        display.clear()?;
        display.write_row(0, "Clock System")?;
        display.write_row(1, "Initialized...")?;
        delay.delay_ms(self.config.display.splash_ms);
        display.clear()?;

        out.write_str(console::BANNER)?;
        out.write_str(console::PROMPT)?;
        Ok(status)
    }

    fn evaluate(&mut self) -> (DateTime, Option<DeviceState>) {
        let now = self.clock.now();
        let edge = self.engine.evaluate(self.clock.schedule(), &now);
        (now, edge)
    }

    /// Handle a debounced key press
    pub fn on_key<C: CharDisplay, W: Write>(
        &mut self,
        key: Key,
        display: &mut C,
        out: &mut W,
    ) -> Result<MenuAction, OutputError> {
        let now = self.clock.now();
        let action = self.menu.handle(key, &now, self.clock.schedule());

        let mut message = None;
        let mut committed = Ok(());
        match action {
            MenuAction::CommitTime(time) => committed = self.clock.set_time(time),
            MenuAction::CommitSchedule { on, off } => {
                self.clock.update_schedule(|s| {
                    s.set_on_time(on);
                    s.set_off_time(off);
                    s.enable();
                });
                message = Some("Schedule set and enabled\r\n");
            }
            MenuAction::None | MenuAction::Cancelled => {}
        }

        let (now, _) = self.evaluate();
        self.menu.render(display, &now, self.engine.state())?;
        if let Some(message) = message {
            out.write_str(message)?;
        }
        if let Err(e) = committed {
            out.write_str(console::CLOCK_WRITE_FAILED)?;
            return Err(e.into());
        }
        Ok(action)
    }

    /// Periodic refresh: evaluate the schedule and redraw the normal screen
    ///
    /// Returns the new device state on a transition.
    pub fn on_refresh<C: CharDisplay, W: Write>(
        &mut self,
        display: &mut C,
        out: &mut W,
    ) -> Result<Option<DeviceState>, OutputError> {
        let (now, edge) = self.evaluate();

        if self.menu.mode() == MenuMode::Normal {
            self.menu.render(display, &now, self.engine.state())?;
            if self.config.console.report_time {
                console::write_time_report(out, &now)?;
            }
        }
        Ok(edge)
    }

    /// One second elapsed
    pub fn on_second(&mut self) {
        self.clock.tick_second();
    }

    /// Execute a complete console line
    pub fn on_command<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<Option<Command>, OutputError> {
        let result = console::dispatch(line, &mut self.clock, self.engine.state(), out);
        self.evaluate();
        result
    }

    /// Release the hardware
    pub fn release(self) -> (B, D, L) {
        let (device, indicator) = self.engine.release();
        (self.clock.release(), device, indicator)
    }
}
