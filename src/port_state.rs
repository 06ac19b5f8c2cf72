//! Per-pin view of a port register.
//!
//! A port's 8-bit value is split into eight single-character fields taken
//! left to right from its binary string, so field 0 is the most significant
//! bit. The fields are positional only; mapping them to GPx0..GPx7 pins is
//! left to the caller.

use crate::codec::{binary8_to_value, REGISTER_BITS};
use crate::error::PortStateError;
use crate::types::{Port, RegisterValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Split an 8 character string into its characters, in order.
pub fn split_port_state(binary: &str) -> Result<[char; REGISTER_BITS], PortStateError> {
    let actual = binary.chars().count();
    if actual != REGISTER_BITS {
        return Err(PortStateError::LengthMismatch {
            expected: REGISTER_BITS,
            actual,
        });
    }

    let mut fields = ['0'; REGISTER_BITS];
    for (field, c) in fields.iter_mut().zip(binary.chars()) {
        *field = c;
    }
    Ok(fields)
}

/// The eight pin fields of one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortState {
    /// Port the fields were read from.
    pub port: Port,
    fields: [char; REGISTER_BITS],
}

impl PortState {
    /// Build a port state from an 8 character string.
    pub fn new(port: Port, binary: &str) -> Result<Self, PortStateError> {
        Ok(Self {
            port,
            fields: split_port_state(binary)?,
        })
    }

    /// Build a port state from a register value.
    pub fn from_value(port: Port, value: RegisterValue) -> Self {
        let mut fields = ['0'; REGISTER_BITS];
        for (field, c) in fields.iter_mut().zip(value.to_binary().chars()) {
            *field = c;
        }
        Self { port, fields }
    }

    /// Field at position `index` (0 = leftmost), if in range.
    pub fn field(&self, index: usize) -> Option<char> {
        self.fields.get(index).copied()
    }

    /// All fields, left to right.
    pub fn fields(&self) -> &[char; REGISTER_BITS] {
        &self.fields
    }

    /// Whether the field at `index` is `'1'`.
    pub fn is_set(&self, index: usize) -> bool {
        self.field(index) == Some('1')
    }

    /// Re-encode the fields as a register value.
    ///
    /// Returns `None` if any field is not `0` or `1`.
    pub fn to_value(&self) -> Option<RegisterValue> {
        binary8_to_value(&self.to_string()).ok().map(RegisterValue::new)
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.fields {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_split() {
        let fields = split_port_state("01101001").unwrap();
        assert_eq!(fields, ['0', '1', '1', '0', '1', '0', '0', '1']);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            split_port_state("0110100"),
            Err(PortStateError::LengthMismatch {
                expected: 8,
                actual: 7
            })
        );
        assert!(split_port_state("011010011").is_err());
        assert!(split_port_state("").is_err());
    }

    #[test]
    fn test_fields_are_passed_through() {
        let fields = split_port_state("abcdefgh").unwrap();
        assert_eq!(fields[0], 'a');
        assert_eq!(fields[7], 'h');
    }

    #[test]
    fn test_port_state_from_value() {
        let state = PortState::from_value(Port::B, RegisterValue::new(0x80));
        assert_eq!(state.to_string(), "10000000");
        assert!(state.is_set(0));
        assert!(!state.is_set(7));
        assert_eq!(state.field(8), None);
        assert_eq!(state.to_value(), Some(RegisterValue::new(0x80)));
    }

    #[test]
    fn test_to_value_requires_bits() {
        let state = PortState::new(Port::A, "0101010x").unwrap();
        assert_eq!(state.to_value(), None);
    }
}
