//! Timeswitch Hardware Abstraction Layer
//!
//! This crate defines the narrow interfaces the board-agnostic clock logic
//! uses to reach its collaborators. Chip-specific crates implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  timeswitch-core / timeswitch-firmware  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  timeswitch-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ timeswitch-hal- │
//!            │     stm32f1     │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`backup::BackupDomain`] - Battery-backed seconds counter and data slots
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::ButtonBank`] - Digital I/O
//! - [`uart::UartTx`] - Serial transmit
//! - [`display::CharDisplay`] - Character LCD

#![no_std]
#![deny(unsafe_code)]

pub mod backup;
pub mod display;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use backup::{BackupDomain, BackupError, BackupSlot};
pub use display::{CharDisplay, CharDisplayExt, DisplayError};
pub use gpio::{ActiveLowButtons, ButtonBank, InputPin, OutputPin};
pub use uart::{UartError, UartTx, UartWriter};
