//! # mcp23x17 - MCP23x17 GPIO expander control over i2c-tools
//!
//! Drives MCP23017/MCP23S17-family I/O expanders on a Linux I2C bus (for
//! example a Raspberry Pi's `/dev/i2c-1`) by running the `i2c-tools`
//! programs, and decodes what they print.
//!
//! ## Features
//!
//! - **Bus Scanning**: Parses `i2cdetect` tables into device addresses
//! - **Register Access**: Named register map for IOCON.BANK = 0
//! - **Pin States**: 8-bit binary decoding and per-pin fields
//! - **Checked Commands**: Exit codes, timeouts and one-at-a-time bus access
//! - **Simulation**: In-memory bus for tests and dry runs
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use mcp23x17::transport::ShellTransport;
//! use mcp23x17::{Expander, Port, RegisterValue};
//!
//! #[tokio::main]
//! async fn main() {
//!     let chip = Expander::new(ShellTransport::new(1), "0x20".parse().unwrap());
//!
//!     chip.set_port_direction(Port::A, RegisterValue::new(0x00)).await.unwrap();
//!     chip.set_pin(Port::A, 0, true).await.unwrap();
//!
//!     let state = chip.read_port_state(Port::B).await.unwrap();
//!     println!("Port B is {}", state);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`codec`] - Hex to 8-bit binary conversion
//! - [`detect`] - `i2cdetect` table parsing
//! - [`port_state`] - Splitting a port value into pin fields
//! - [`registers`] - The register address table
//! - [`transport`] - The `BusTransport` trait and its implementations
//! - [`expander`] - Chip-level operations over a transport
//! - [`config`] - Settings file management
//! - [`error`] - Error types
//! - [`output`] - Output formatting utilities

pub mod cli;
pub mod codec;
pub mod config;
pub mod detect;
pub mod error;
pub mod expander;
pub mod output;
pub mod port_state;
pub mod registers;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, CodecError, ExpanderError, PortStateError, TransportError};
pub use expander::Expander;
pub use port_state::PortState;
pub use registers::{Register, RegisterMap};
pub use transport::BusTransport;
pub use types::{DeviceAddress, Direction, Port, RegisterAddress, RegisterValue};
