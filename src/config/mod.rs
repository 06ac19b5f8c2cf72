//! Configuration management for mcp23x17.
//!
//! Provides XDG-compliant storage of the application settings: which bus and
//! chip to talk to and how to run the `i2c-tools`.

mod settings;

pub use settings::{AppSettings, Paths};
