//! Bus transports.
//!
//! The expander never talks to the bus directly. A [`BusTransport`] turns
//! detect/read/write requests into raw text; [`ShellTransport`] does that
//! with the `i2c-tools` programs and [`MemoryTransport`] simulates a bus in
//! memory.

pub mod memory;
pub mod shell;
pub mod traits;

pub use memory::MemoryTransport;
pub use shell::{ShellTransport, ToolPaths};
pub use traits::{BoxedTransport, BusTransport};
