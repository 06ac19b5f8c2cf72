//! MCP23x17 register map for IOCON.BANK = 0.
//!
//! In the default bank mode the A and B registers are interleaved: port A
//! registers sit at even addresses and the matching port B register at the
//! next odd address.

use crate::types::{Port, RegisterAddress};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A named register on the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Register {
    Iodira,
    Iodirb,
    Ipola,
    Ipolb,
    Gpintena,
    Gpintenb,
    Defvala,
    Defvalb,
    Intcona,
    Intconb,
    Iocona,
    Ioconb,
    Gppua,
    Gppub,
    Intfa,
    Intfb,
    Intcapa,
    Intcapb,
    Gpioa,
    Gpiob,
    Olata,
    Olatb,
}

impl Register {
    /// Every register in address order.
    pub const ALL: [Register; 22] = [
        Self::Iodira,
        Self::Iodirb,
        Self::Ipola,
        Self::Ipolb,
        Self::Gpintena,
        Self::Gpintenb,
        Self::Defvala,
        Self::Defvalb,
        Self::Intcona,
        Self::Intconb,
        Self::Iocona,
        Self::Ioconb,
        Self::Gppua,
        Self::Gppub,
        Self::Intfa,
        Self::Intfb,
        Self::Intcapa,
        Self::Intcapb,
        Self::Gpioa,
        Self::Gpiob,
        Self::Olata,
        Self::Olatb,
    ];

    /// Register address at IOCON.BANK = 0.
    pub const fn address(self) -> RegisterAddress {
        RegisterAddress::new(self as u8)
    }

    /// Datasheet name, e.g. `GPIOA`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iodira => "IODIRA",
            Self::Iodirb => "IODIRB",
            Self::Ipola => "IPOLA",
            Self::Ipolb => "IPOLB",
            Self::Gpintena => "GPINTENA",
            Self::Gpintenb => "GPINTENB",
            Self::Defvala => "DEFVALA",
            Self::Defvalb => "DEFVALB",
            Self::Intcona => "INTCONA",
            Self::Intconb => "INTCONB",
            Self::Iocona => "IOCONA",
            Self::Ioconb => "IOCONB",
            Self::Gppua => "GPPUA",
            Self::Gppub => "GPPUB",
            Self::Intfa => "INTFA",
            Self::Intfb => "INTFB",
            Self::Intcapa => "INTCAPA",
            Self::Intcapb => "INTCAPB",
            Self::Gpioa => "GPIOA",
            Self::Gpiob => "GPIOB",
            Self::Olata => "OLATA",
            Self::Olatb => "OLATB",
        }
    }

    /// Which port the register belongs to.
    pub const fn port(self) -> Port {
        if (self as u8) % 2 == 0 {
            Port::A
        } else {
            Port::B
        }
    }

    /// Short description of what the register controls.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Iodira | Self::Iodirb => "I/O direction (1 = input, 0 = output)",
            Self::Ipola | Self::Ipolb => "Input polarity (1 = inverted)",
            Self::Gpintena | Self::Gpintenb => "Interrupt-on-change enable",
            Self::Defvala | Self::Defvalb => "Default compare value",
            Self::Intcona | Self::Intconb => "Interrupt-on-change control",
            Self::Iocona | Self::Ioconb => "I/O expander configuration",
            Self::Gppua | Self::Gppub => "Pull-up resistors",
            Self::Intfa | Self::Intfb => "Interrupt flags",
            Self::Intcapa | Self::Intcapb => "Interrupt captured value",
            Self::Gpioa | Self::Gpiob => "Port value",
            Self::Olata | Self::Olatb => "Output latch",
        }
    }

    /// Direction register for a port.
    pub const fn iodir(port: Port) -> Self {
        match port {
            Port::A => Self::Iodira,
            Port::B => Self::Iodirb,
        }
    }

    /// Port value register for a port.
    pub const fn gpio(port: Port) -> Self {
        match port {
            Port::A => Self::Gpioa,
            Port::B => Self::Gpiob,
        }
    }

    /// Output latch register for a port.
    pub const fn olat(port: Port) -> Self {
        match port {
            Port::A => Self::Olata,
            Port::B => Self::Olatb,
        }
    }
}

impl From<Register> for RegisterAddress {
    fn from(register: Register) -> Self {
        register.address()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for register name lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown register '{0}'")]
pub struct UnknownRegister(pub String);

impl FromStr for Register {
    type Err = UnknownRegister;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegisterMap::register(s).ok_or_else(|| UnknownRegister(s.to_string()))
    }
}

/// Name index over [`Register::ALL`].
static BY_NAME: LazyLock<HashMap<&'static str, Register>> =
    LazyLock::new(|| Register::ALL.iter().map(|r| (r.name(), *r)).collect());

/// Read-only lookup over the register table.
pub struct RegisterMap;

impl RegisterMap {
    /// Look up a register by datasheet name, case-insensitively.
    pub fn register(name: &str) -> Option<Register> {
        BY_NAME.get(name.trim().to_ascii_uppercase().as_str()).copied()
    }

    /// Look up a register address by name, e.g. `"IODIRA"` -> `0x00`.
    pub fn lookup(name: &str) -> Option<RegisterAddress> {
        Self::register(name).map(Register::address)
    }

    /// Find the register at an address, if any.
    pub fn by_address(address: RegisterAddress) -> Option<Register> {
        Register::ALL.get(address.as_u8() as usize).copied()
    }

    /// Every `(name, address)` pair in address order.
    pub fn entries() -> impl Iterator<Item = (&'static str, RegisterAddress)> {
        Register::ALL.iter().map(|r| (r.name(), r.address()))
    }

    /// Registers of a single port in address order.
    pub fn port(port: Port) -> impl Iterator<Item = Register> {
        Register::ALL.into_iter().filter(move |r| r.port() == port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_names() {
        assert_eq!(RegisterMap::lookup("IODIRA"), Some(RegisterAddress::new(0x00)));
        assert_eq!(RegisterMap::lookup("IODIRB"), Some(RegisterAddress::new(0x01)));
        assert_eq!(RegisterMap::lookup("IOCONA"), Some(RegisterAddress::new(0x0a)));
        assert_eq!(RegisterMap::lookup("GPIOA"), Some(RegisterAddress::new(0x12)));
        assert_eq!(RegisterMap::lookup("GPIOB"), Some(RegisterAddress::new(0x13)));
        assert_eq!(RegisterMap::lookup("OLATB"), Some(RegisterAddress::new(0x15)));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(RegisterMap::lookup("gpioa"), RegisterMap::lookup("GPIOA"));
        assert_eq!(RegisterMap::lookup("nope"), None);
    }

    #[test]
    fn test_addresses_are_distinct_and_dense() {
        let addresses: HashSet<u8> = RegisterMap::entries().map(|(_, a)| a.as_u8()).collect();
        assert_eq!(addresses.len(), 22);
        assert_eq!(addresses.iter().max(), Some(&0x15));
    }

    #[test]
    fn test_ports_alternate() {
        for register in Register::ALL {
            let expected = if register.name().ends_with('A') {
                Port::A
            } else {
                Port::B
            };
            assert_eq!(register.port(), expected, "{}", register);
        }
        assert_eq!(RegisterMap::port(Port::A).count(), 11);
    }

    #[test]
    fn test_by_address() {
        assert_eq!(
            RegisterMap::by_address(RegisterAddress::new(0x14)),
            Some(Register::Olata)
        );
        assert_eq!(RegisterMap::by_address(RegisterAddress::new(0x16)), None);
    }

    #[test]
    fn test_port_helpers() {
        assert_eq!(Register::iodir(Port::B), Register::Iodirb);
        assert_eq!(Register::gpio(Port::A).address().to_string(), "0x12");
        assert_eq!(Register::olat(Port::B).address().to_string(), "0x15");
    }
}
