//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `mcp23x17 detect` - Scan the bus for devices
//! - `mcp23x17 read|write|direction` - Register access
//! - `mcp23x17 state|pin|mode` - Port and pin access
//! - `mcp23x17 registers|decode` - Offline helpers
//! - `mcp23x17 config show|init` - Settings file management

mod config;
mod decode;
mod detect;
mod port;
mod register;

pub use config::{ConfigAction, ConfigCommand};
pub use decode::{DecodeCommand, RegistersCommand};
pub use detect::DetectCommand;
pub use port::{Level, ModeCommand, PinCommand, StateCommand};
pub use register::{DirectionCommand, ReadCommand, WriteCommand};

use crate::config::AppSettings;
use crate::error::{CliError, CliResult, ConfigResult};
use crate::expander::Expander;
use crate::registers::RegisterMap;
use crate::transport::{BoxedTransport, BusTransport, MemoryTransport};
use crate::types::{DeviceAddress, RegisterAddress};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

/// mcp23x17 - drive MCP23x17 GPIO expanders through i2c-tools.
///
/// Reads and writes expander registers on a Linux I2C bus using the
/// `i2cdetect`, `i2cget` and `i2cset` programs.
#[derive(Parser, Debug)]
#[command(name = "mcp23x17")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Control MCP23x17 GPIO expanders over I2C", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// I2C bus number (overrides the settings file)
    #[arg(long, global = true, env = "MCP23X17_BUS")]
    pub bus: Option<u8>,

    /// Chip address, e.g. 0x20 (overrides the settings file)
    #[arg(short, long, global = true, env = "MCP23X17_DEVICE")]
    pub device: Option<DeviceAddress>,

    /// Use an in-memory simulated bus instead of i2c-tools
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the bus for devices
    #[command(alias = "scan")]
    Detect(DetectCommand),

    /// Read a register
    #[command(alias = "r")]
    Read(ReadCommand),

    /// Write a register
    #[command(alias = "w")]
    Write(WriteCommand),

    /// Set the I/O direction of a port
    Direction(DirectionCommand),

    /// Show the pin fields of a port
    #[command(alias = "s")]
    State(StateCommand),

    /// Read or drive a single pin
    Pin(PinCommand),

    /// Make a single pin an input or an output
    Mode(ModeCommand),

    /// List the register map
    Registers(RegistersCommand),

    /// Decode a hex value into binary and pin fields
    Decode(DecodeCommand),

    /// Manage the settings file
    Config(ConfigCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Everything a command handler needs.
pub struct Context {
    /// Effective settings after command-line overrides.
    pub settings: AppSettings,
    pub output: OutputFormat,
    pub quiet: bool,
    simulate: bool,
}

impl Context {
    /// Build an expander for the configured bus and chip.
    pub fn expander(&self) -> CliResult<Expander<BoxedTransport>> {
        let address = self.settings.device_address()?;

        let transport: BoxedTransport = if self.simulate {
            let bus = MemoryTransport::new();
            if let Some(raw) = address.to_u8() {
                bus.attach(raw);
            }
            Box::new(bus)
        } else {
            Box::new(self.settings.shell_transport())
        };

        debug!(transport = transport.name(), device = %address, "using expander");
        Ok(Expander::new(transport, address))
    }
}

impl Cli {
    /// Resolve settings and run the selected subcommand.
    pub async fn run(self) -> CliResult<()> {
        let ctx = if self.is_config_init() {
            let settings = self.load_settings().unwrap_or_else(|e| {
                warn!(error = %e, "settings file unreadable, starting from defaults");
                AppSettings::default()
            });
            self.apply_overrides(settings)
        } else {
            self.context()?
        };

        match &self.command {
            Commands::Detect(cmd) => cmd.execute(&ctx).await,
            Commands::Read(cmd) => cmd.execute(&ctx).await,
            Commands::Write(cmd) => cmd.execute(&ctx).await,
            Commands::Direction(cmd) => cmd.execute(&ctx).await,
            Commands::State(cmd) => cmd.execute(&ctx).await,
            Commands::Pin(cmd) => cmd.execute(&ctx).await,
            Commands::Mode(cmd) => cmd.execute(&ctx).await,
            Commands::Registers(cmd) => cmd.execute(&ctx),
            Commands::Decode(cmd) => cmd.execute(&ctx),
            Commands::Config(cmd) => cmd.execute(&ctx, self.config.as_deref()),
        }
    }

    /// Load the settings file and apply command-line overrides.
    pub fn context(&self) -> CliResult<Context> {
        let settings = self.load_settings()?;
        Ok(self.apply_overrides(settings))
    }

    /// Read the settings file. A missing file means defaults.
    fn load_settings(&self) -> ConfigResult<AppSettings> {
        match &self.config {
            Some(path) if path.exists() => AppSettings::load_from(path),
            Some(_) => Ok(AppSettings::default()),
            None => AppSettings::load(),
        }
    }

    fn apply_overrides(&self, mut settings: AppSettings) -> Context {
        if let Some(bus) = self.bus {
            settings.bus = bus;
        }
        if let Some(device) = &self.device {
            settings.device = device.to_string();
        }

        Context {
            settings,
            output: self.output,
            quiet: self.quiet,
            simulate: self.simulate,
        }
    }

    /// `config init` must work even when the current file cannot be read.
    fn is_config_init(&self) -> bool {
        matches!(
            &self.command,
            Commands::Config(ConfigCommand {
                action: ConfigAction::Init { .. }
            })
        )
    }
}

/// Resolve a register given by name (`GPIOA`) or address (`0x12`).
pub fn parse_register(s: &str) -> CliResult<RegisterAddress> {
    RegisterMap::lookup(s)
        .or_else(|| s.parse().ok())
        .ok_or_else(|| CliError::InvalidArgument(format!("unknown register '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_register() {
        assert_eq!(parse_register("gpioa").unwrap().as_u8(), 0x12);
        assert_eq!(parse_register("0x15").unwrap().as_u8(), 0x15);
        assert!(matches!(
            parse_register("PORTZ"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        AppSettings::default().save_to(&path).unwrap();

        let cli = Cli::parse_from([
            "mcp23x17",
            "--config",
            path.to_str().unwrap(),
            "--bus",
            "0",
            "-d",
            "0x27",
            "registers",
        ]);
        let ctx = cli.context().unwrap();
        assert_eq!(ctx.settings.bus, 0);
        assert_eq!(ctx.settings.device, "0x27");
    }

    #[tokio::test]
    async fn test_config_init_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let cli = Cli::parse_from([
            "mcp23x17",
            "-q",
            "--config",
            path.to_str().unwrap(),
            "--bus",
            "0",
            "config",
            "init",
        ]);
        cli.run().await.unwrap();

        assert!(path.exists());
        assert_eq!(AppSettings::load_from(&path).unwrap().bus, 0);
    }

    #[tokio::test]
    async fn test_config_init_force_repairs_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = path.to_str().unwrap();
        let args = ["mcp23x17", "-q", "--config", config, "config", "init", "--force"];
        Cli::parse_from(args).run().await.unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), AppSettings::default());

        std::fs::write(&path, "{ not json").unwrap();
        let cli = Cli::parse_from(["mcp23x17", "--config", config, "registers"]);
        assert!(matches!(cli.context(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_custom_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let cli = Cli::parse_from(["mcp23x17", "--config", path.to_str().unwrap(), "registers"]);
        assert_eq!(cli.context().unwrap().settings, AppSettings::default());
    }

    #[tokio::test]
    async fn test_simulated_expander() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        AppSettings::default().save_to(&path).unwrap();

        let cli = Cli::parse_from([
            "mcp23x17",
            "--config",
            path.to_str().unwrap(),
            "--simulate",
            "-d",
            "0x21",
            "detect",
        ]);
        let chip = cli.context().unwrap().expander().unwrap();
        let devices = chip.detect_devices().await.unwrap();
        assert_eq!(devices, vec!["0x21".parse::<DeviceAddress>().unwrap()]);
    }
}
