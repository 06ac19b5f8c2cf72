//! Register subcommand implementations.
//!
//! Handles `mcp23x17 read`, `mcp23x17 write` and `mcp23x17 direction`.

use super::{parse_register, Context, OutputFormat};
use crate::error::CliResult;
use crate::output::{self, Reading, Report};
use crate::registers::Register;
use crate::types::{Port, RegisterValue};
use clap::Parser;

/// Read a register.
#[derive(Parser, Debug)]
pub struct ReadCommand {
    /// Register name (e.g. GPIOA) or address (e.g. 0x12)
    #[arg(value_name = "REGISTER")]
    pub register: String,
}

impl ReadCommand {
    /// Execute the read command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let register = parse_register(&self.register)?;
        let chip = ctx.expander()?;
        let value = chip.read_register(register).await?;

        let reading = Reading::new(chip.address().clone(), register, value);
        output::print_report(&Report::Reading(reading), ctx.output)?;
        Ok(())
    }
}

/// Write a register.
#[derive(Parser, Debug)]
pub struct WriteCommand {
    /// Register name (e.g. OLATA) or address (e.g. 0x14)
    #[arg(value_name = "REGISTER")]
    pub register: String,

    /// Value to write, 1-2 hex digits (e.g. 0xff)
    #[arg(value_name = "VALUE")]
    pub value: RegisterValue,
}

impl WriteCommand {
    /// Execute the write command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let register = parse_register(&self.register)?;
        let chip = ctx.expander()?;
        chip.write_register(register, self.value).await?;

        let reading = Reading::new(chip.address().clone(), register, self.value);
        report_write(ctx, &reading)
    }
}

/// Set the I/O direction of a port.
#[derive(Parser, Debug)]
pub struct DirectionCommand {
    /// Port to configure
    #[arg(value_enum, ignore_case = true)]
    pub port: Port,

    /// Direction bits, 1 = input and 0 = output (e.g. 0x00 for all outputs)
    #[arg(value_name = "VALUE")]
    pub value: RegisterValue,
}

impl DirectionCommand {
    /// Execute the direction command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let chip = ctx.expander()?;
        chip.set_port_direction(self.port, self.value).await?;

        let register = Register::iodir(self.port).address();
        let reading = Reading::new(chip.address().clone(), register, self.value);
        report_write(ctx, &reading)
    }
}

/// Confirm a write in the selected output format.
pub(super) fn report_write(ctx: &Context, reading: &Reading) -> CliResult<()> {
    if ctx.output == OutputFormat::Plain {
        if !ctx.quiet {
            let target = reading
                .register
                .map(str::to_string)
                .unwrap_or_else(|| reading.address.to_string());
            output::print_success(&format!(
                "Wrote {} to {} on {}",
                reading.value, target, reading.device
            ));
        }
        return Ok(());
    }

    output::print_report(&Report::Reading(reading.clone()), ctx.output)?;
    Ok(())
}
