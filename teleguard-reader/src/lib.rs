//! Teleinfo meter reader
//!
//! Wires a line source (serial port or capture file), the core measurement
//! pipeline and an emission sink (MQTT broker or log) into one loop.

pub mod cli;
pub mod logging;
pub mod reader;
pub mod settings;

pub use cli::Args;
pub use reader::{run, RunOptions, RunSummary};
pub use settings::Settings;
