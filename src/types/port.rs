//! Port and pin direction types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the expander's two 8-bit GPIO ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    /// GPA0-GPA7.
    A,
    /// GPB0-GPB7.
    B,
}

impl Port {
    /// Both ports, A first.
    pub const ALL: [Port; 2] = [Port::A, Port::B];

    /// Port letter as used in register names.
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Error type for port parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown port '{0}': expected A or B")]
pub struct PortParseError(pub String);

impl FromStr for Port {
    type Err = PortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(PortParseError(s.to_string())),
        }
    }
}

/// Pin direction as encoded in an IODIR bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Bit value `0`.
    #[value(alias = "out")]
    Output,
    /// Bit value `1`.
    #[value(alias = "in")]
    Input,
}

impl Direction {
    /// Whether the IODIR bit for this direction is set.
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    /// Interpret an IODIR bit.
    pub const fn from_bit(set: bool) -> Self {
        if set {
            Self::Input
        } else {
            Self::Output
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => write!(f, "output"),
            Self::Input => write!(f, "input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_from_str() {
        assert_eq!("a".parse::<Port>().unwrap(), Port::A);
        assert_eq!("B".parse::<Port>().unwrap(), Port::B);
        assert!("C".parse::<Port>().is_err());
    }

    #[test]
    fn test_direction_bits() {
        assert!(Direction::Input.is_input());
        assert!(!Direction::Output.is_input());
        assert_eq!(Direction::from_bit(true), Direction::Input);
        assert_eq!(Direction::from_bit(false), Direction::Output);
    }
}
