//! 8-bit register values.

use crate::codec::strip_hex_prefix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for register value parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid register value '{0}': expected 1-2 hex digits")]
pub struct ValueError(pub String);

/// A byte read from or written to a register.
///
/// Parsed from 1-2 hex digits (optionally `0x`-prefixed), displayed the way
/// `i2cget` prints it (`0x0a`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisterValue(u8);

impl RegisterValue {
    /// Create a value from a raw byte.
    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the raw byte.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Zero-padded binary form, most significant bit first.
    pub fn to_binary(self) -> String {
        format!("{:08b}", self.0)
    }

    /// State of electrical bit `bit` (0 = least significant).
    #[inline]
    pub const fn bit(self, bit: u8) -> bool {
        bit < 8 && self.0 & (1 << bit) != 0
    }

    /// Return a copy with electrical bit `bit` set or cleared.
    #[inline]
    pub const fn with_bit(self, bit: u8, high: bool) -> Self {
        if bit >= 8 {
            return self;
        }
        if high {
            Self(self.0 | (1 << bit))
        } else {
            Self(self.0 & !(1 << bit))
        }
    }
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

impl FromStr for RegisterValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s);
        if digits.is_empty()
            || digits.len() > 2
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ValueError(s.to_string()));
        }
        u8::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ValueError(s.to_string()))
    }
}

impl From<u8> for RegisterValue {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<RegisterValue> for u8 {
    fn from(value: RegisterValue) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_i2cget_output() {
        assert_eq!("0x1f".parse::<RegisterValue>().unwrap().as_u8(), 0x1f);
        assert_eq!("FF".parse::<RegisterValue>().unwrap().as_u8(), 0xff);
        assert_eq!("0".parse::<RegisterValue>().unwrap().as_u8(), 0);
        assert!("0x100".parse::<RegisterValue>().is_err());
        assert!("xyz".parse::<RegisterValue>().is_err());
    }

    #[test]
    fn test_display_and_binary() {
        let value = RegisterValue::new(0x0a);
        assert_eq!(value.to_string(), "0x0a");
        assert_eq!(value.to_binary(), "00001010");
    }

    #[test]
    fn test_bits() {
        let value = RegisterValue::new(0b0000_0101);
        assert!(value.bit(0));
        assert!(!value.bit(1));
        assert!(value.bit(2));
        assert!(!value.bit(8));

        assert_eq!(value.with_bit(7, true).as_u8(), 0b1000_0101);
        assert_eq!(value.with_bit(0, false).as_u8(), 0b0000_0100);
        assert_eq!(value.with_bit(9, true), value);
    }
}
