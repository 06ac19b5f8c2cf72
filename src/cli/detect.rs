//! Detect subcommand implementation.
//!
//! Handles the `mcp23x17 detect` command, which scans the bus and lists the
//! addresses that answered.

use super::Context;
use crate::error::CliResult;
use crate::output::{self, DeviceReport, Report};
use crate::transport::BusTransport;
use chrono::Utc;
use clap::Parser;

/// Scan the bus for devices.
#[derive(Parser, Debug)]
pub struct DetectCommand {
    /// Print the raw i2cdetect table instead of the parsed list
    #[arg(long)]
    pub raw: bool,
}

impl DetectCommand {
    /// Execute the detect command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let chip = ctx.expander()?;

        if self.raw {
            let table = chip.transport().detect().await?;
            print!("{}", table);
            return Ok(());
        }

        let devices = chip.detect_devices().await?;
        let report = Report::Devices(DeviceReport {
            transport: chip.transport().name().to_string(),
            devices,
            scanned_at: Utc::now(),
        });

        output::print_report(&report, ctx.output)?;
        Ok(())
    }
}
