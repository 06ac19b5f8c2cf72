//! Register and device address types.
//!
//! Both are written on the bus command line as `0x`-prefixed hex. A
//! `RegisterAddress` is always a valid byte; a `DeviceAddress` keeps its
//! textual form because addresses read back from an `i2cdetect` table are
//! taken verbatim.

use crate::codec::strip_hex_prefix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for address parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("invalid address '{0}': expected 1-2 hex digits, optionally prefixed with 0x")]
    InvalidFormat(String),
    #[error("device address {0:#04x} is outside the 7-bit range")]
    OutOfRange(u8),
}

/// Parse exactly 1-2 hex digits with an optional `0x` prefix.
fn parse_short_hex(s: &str) -> Result<u8, AddressError> {
    let digits = strip_hex_prefix(s);
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::InvalidFormat(s.to_string()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| AddressError::InvalidFormat(s.to_string()))
}

/// Address of a register on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisterAddress(u8);

impl RegisterAddress {
    /// Create a register address from a raw byte.
    #[inline]
    pub const fn new(address: u8) -> Self {
        Self(address)
    }

    /// Get the raw register number.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl FromStr for RegisterAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_short_hex(s).map(Self)
    }
}

impl From<u8> for RegisterAddress {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Address of a chip on the I2C bus, e.g. `0x20`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    /// Highest address a 7-bit I2C device can answer on.
    pub const MAX: u8 = 0x7f;

    /// Create a device address from a 7-bit bus address.
    pub fn new(address: u8) -> Result<Self, AddressError> {
        if address > Self::MAX {
            return Err(AddressError::OutOfRange(address));
        }
        Ok(Self(format!("0x{:02x}", address)))
    }

    /// Build an address from a two-character `i2cdetect` cell, unvalidated.
    ///
    /// Cells other than hex pairs (for instance `UU`) are kept as-is, so the
    /// result may not be numeric. See [`DeviceAddress::to_u8`].
    pub fn from_scan_cell(cell: &str) -> Self {
        Self(format!("0x{}", cell))
    }

    /// The address as written on a command line.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if the address is a well-formed hex pair.
    pub fn to_u8(&self) -> Option<u8> {
        parse_short_hex(&self.0).ok()
    }
}

impl Default for DeviceAddress {
    /// `0x20`: all three hardware address pins tied low.
    fn default() -> Self {
        Self("0x20".to_string())
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_short_hex(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_address_parsing() {
        assert_eq!("0x12".parse::<RegisterAddress>().unwrap().as_u8(), 0x12);
        assert_eq!("0A".parse::<RegisterAddress>().unwrap().as_u8(), 0x0a);
        assert_eq!("f".parse::<RegisterAddress>().unwrap().as_u8(), 0x0f);
        assert!("0x123".parse::<RegisterAddress>().is_err());
        assert!("".parse::<RegisterAddress>().is_err());
        assert!("0xg1".parse::<RegisterAddress>().is_err());
    }

    #[test]
    fn test_register_address_display() {
        assert_eq!(RegisterAddress::new(0x0a).to_string(), "0x0A");
        assert_eq!(RegisterAddress::new(0x00).to_string(), "0x00");
    }

    #[test]
    fn test_device_address_normalised() {
        let addr: DeviceAddress = "0X2A".parse().unwrap();
        assert_eq!(addr.as_str(), "0x2a");
        assert_eq!(addr.to_u8(), Some(0x2a));

        let addr: DeviceAddress = "7".parse().unwrap();
        assert_eq!(addr.as_str(), "0x07");
    }

    #[test]
    fn test_device_address_range() {
        assert_eq!(
            "0x80".parse::<DeviceAddress>(),
            Err(AddressError::OutOfRange(0x80))
        );
        assert!(DeviceAddress::new(0x77).is_ok());
    }

    #[test]
    fn test_scan_cell_is_verbatim() {
        let addr = DeviceAddress::from_scan_cell("UU");
        assert_eq!(addr.as_str(), "0xUU");
        assert_eq!(addr.to_u8(), None);

        let addr = DeviceAddress::from_scan_cell("20");
        assert_eq!(addr, "0x20".parse().unwrap());
    }
}
