//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of bus scans,
//! register reads and port states.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{print_csv, write_csv};
pub use json_format::print_json;
pub use plain::{print_error, print_plain, print_success, print_warning, write_plain};

use crate::cli::OutputFormat;
use crate::port_state::PortState;
use crate::registers::{Register, RegisterMap};
use crate::types::{DeviceAddress, Port, RegisterAddress, RegisterValue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io;

/// Devices found by a bus scan.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    /// Transport that performed the scan.
    pub transport: String,
    pub devices: Vec<DeviceAddress>,
    pub scanned_at: DateTime<Utc>,
}

/// One row of the register map.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRow {
    pub name: &'static str,
    pub address: RegisterAddress,
    pub port: Port,
    pub description: &'static str,
}

impl From<Register> for RegisterRow {
    fn from(register: Register) -> Self {
        Self {
            name: register.name(),
            address: register.address(),
            port: register.port(),
            description: register.description(),
        }
    }
}

/// A register value read from (or written to) a chip.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub device: DeviceAddress,
    /// Register name, when the address is a known register.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register: Option<&'static str>,
    pub address: RegisterAddress,
    pub value: RegisterValue,
    pub binary: String,
    pub at: DateTime<Utc>,
}

impl Reading {
    /// Create a reading timestamped now.
    pub fn new(device: DeviceAddress, address: RegisterAddress, value: RegisterValue) -> Self {
        Self {
            device,
            register: RegisterMap::by_address(address).map(Register::name),
            address,
            value,
            binary: value.to_binary(),
            at: Utc::now(),
        }
    }
}

/// Pin fields of one port.
#[derive(Debug, Clone, Serialize)]
pub struct PortReport {
    pub device: DeviceAddress,
    pub port: Port,
    pub state: String,
    pub fields: Vec<char>,
    pub read_at: DateTime<Utc>,
}

impl PortReport {
    /// Create a report timestamped now.
    pub fn new(device: DeviceAddress, state: &PortState) -> Self {
        Self {
            device,
            port: state.port,
            state: state.to_string(),
            fields: state.fields().to_vec(),
            read_at: Utc::now(),
        }
    }
}

/// Input level of a single pin.
#[derive(Debug, Clone, Serialize)]
pub struct PinReport {
    pub device: DeviceAddress,
    pub port: Port,
    pub pin: u8,
    pub high: bool,
    pub read_at: DateTime<Utc>,
}

impl PinReport {
    /// Create a report timestamped now.
    pub fn new(device: DeviceAddress, port: Port, pin: u8, high: bool) -> Self {
        Self {
            device,
            port,
            pin,
            high,
            read_at: Utc::now(),
        }
    }

    /// Datasheet pin name, e.g. `GPA3`.
    pub fn pin_name(&self) -> String {
        format!("GP{}{}", self.port, self.pin)
    }
}

/// Offline decode of a hex value.
#[derive(Debug, Clone, Serialize)]
pub struct Decoded {
    pub hex: String,
    pub binary: String,
    pub fields: Vec<char>,
}

/// Anything a command can print.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Devices(DeviceReport),
    Registers(Vec<RegisterRow>),
    Reading(Reading),
    Ports(Vec<PortReport>),
    Pin(PinReport),
    Decoded(Decoded),
}

/// Format and print a report according to the specified format.
pub fn print_report(report: &Report, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(report),
        OutputFormat::Json => json_format::print_json(report),
        OutputFormat::Csv => csv_format::print_csv(report),
    }
}
