//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod console_rx;
pub mod controller;
pub mod heartbeat;

pub use console_rx::console_rx_task;
pub use controller::controller_task;
pub use heartbeat::heartbeat_task;
