//! Offline subcommands.
//!
//! `mcp23x17 registers` and `mcp23x17 decode` never touch the bus.

use super::Context;
use crate::codec::hex_to_binary8;
use crate::error::CliResult;
use crate::output::{self, Decoded, RegisterRow, Report};
use crate::port_state::split_port_state;
use crate::registers::{Register, RegisterMap};
use crate::types::Port;
use clap::Parser;

/// List the register map.
#[derive(Parser, Debug)]
pub struct RegistersCommand {
    /// Only list registers of this port
    #[arg(long, value_enum, ignore_case = true)]
    pub port: Option<Port>,
}

impl RegistersCommand {
    /// Execute the registers command.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let rows: Vec<RegisterRow> = match self.port {
            Some(port) => RegisterMap::port(port).map(RegisterRow::from).collect(),
            None => Register::ALL.into_iter().map(RegisterRow::from).collect(),
        };

        output::print_report(&Report::Registers(rows), ctx.output)?;
        Ok(())
    }
}

/// Decode a hex value into binary and pin fields.
#[derive(Parser, Debug)]
pub struct DecodeCommand {
    /// Hex value, e.g. 0x2c or FF
    #[arg(value_name = "HEX")]
    pub hex: String,
}

impl DecodeCommand {
    /// Execute the decode command.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let binary = hex_to_binary8(&self.hex)?;
        let fields = split_port_state(&binary)?;

        let report = Report::Decoded(Decoded {
            hex: self.hex.clone(),
            binary,
            fields: fields.to_vec(),
        });
        output::print_report(&report, ctx.output)?;
        Ok(())
    }
}
