//! Configuration types
//!
//! Board-agnostic settings, read from the firmware's embedded TOML file.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
