//! Port subcommand implementations.
//!
//! Handles `mcp23x17 state`, `mcp23x17 pin` and `mcp23x17 mode`.

use super::register::report_write;
use super::Context;
use crate::error::CliResult;
use crate::output::{self, PinReport, PortReport, Reading, Report};
use crate::registers::Register;
use crate::types::{Direction, Port};
use clap::{Parser, ValueEnum};

/// Show the pin fields of a port.
#[derive(Parser, Debug)]
pub struct StateCommand {
    /// Port to read (both ports when omitted)
    #[arg(value_enum, ignore_case = true)]
    pub port: Option<Port>,
}

impl StateCommand {
    /// Execute the state command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let chip = ctx.expander()?;
        let ports = match self.port {
            Some(port) => vec![port],
            None => Port::ALL.to_vec(),
        };

        let mut reports = Vec::with_capacity(ports.len());
        for port in ports {
            let state = chip.read_port_state(port).await?;
            reports.push(PortReport::new(chip.address().clone(), &state));
        }

        output::print_report(&Report::Ports(reports), ctx.output)?;
        Ok(())
    }
}

/// Logic level for an output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    /// Drive the pin high
    #[value(alias = "high", alias = "1")]
    On,
    /// Drive the pin low
    #[value(alias = "low", alias = "0")]
    Off,
}

impl Level {
    /// Whether this level drives the pin high.
    pub const fn is_high(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Read or drive a single pin.
#[derive(Parser, Debug)]
pub struct PinCommand {
    /// Port the pin belongs to
    #[arg(value_enum, ignore_case = true)]
    pub port: Port,

    /// Pin number, 0-7 (GPx0-GPx7)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=7))]
    pub pin: u8,

    /// Level to drive (reads the pin when omitted)
    #[arg(value_enum, ignore_case = true)]
    pub level: Option<Level>,
}

impl PinCommand {
    /// Execute the pin command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let chip = ctx.expander()?;

        let Some(level) = self.level else {
            let high = chip.read_pin(self.port, self.pin).await?;
            let report = PinReport::new(chip.address().clone(), self.port, self.pin, high);
            output::print_report(&Report::Pin(report), ctx.output)?;
            return Ok(());
        };

        let latch = chip.set_pin(self.port, self.pin, level.is_high()).await?;
        let register = Register::olat(self.port).address();
        let reading = Reading::new(chip.address().clone(), register, latch);
        report_write(ctx, &reading)
    }
}

/// Make a single pin an input or an output.
#[derive(Parser, Debug)]
pub struct ModeCommand {
    /// Port the pin belongs to
    #[arg(value_enum, ignore_case = true)]
    pub port: Port,

    /// Pin number, 0-7 (GPx0-GPx7)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=7))]
    pub pin: u8,

    /// Direction to set
    #[arg(value_enum, ignore_case = true)]
    pub direction: Direction,
}

impl ModeCommand {
    /// Execute the mode command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let chip = ctx.expander()?;
        let iodir = chip
            .set_pin_direction(self.port, self.pin, self.direction)
            .await?;

        let register = Register::iodir(self.port).address();
        let reading = Reading::new(chip.address().clone(), register, iodir);
        report_write(ctx, &reading)
    }
}
