//! Core type definitions using newtype patterns for type safety.
//!
//! Register and device addresses are validated at the boundary so that only
//! well-formed hex strings ever reach a bus command line.

mod address;
mod port;
mod value;

pub use address::{AddressError, DeviceAddress, RegisterAddress};
pub use port::{Direction, Port, PortParseError};
pub use value::{RegisterValue, ValueError};
