//! Config subcommand implementation.
//!
//! Handles the `mcp23x17 config` command for inspecting and writing the
//! settings file.

use super::Context;
use crate::config::{AppSettings, Paths};
use crate::error::{CliError, CliResult};
use crate::output;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Manage the settings file.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Settings file actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,

    /// Print the settings file location
    Path,

    /// Write the effective settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, ctx: &Context, custom: Option<&Path>) -> CliResult<()> {
        match &self.action {
            ConfigAction::Show => {
                let json = serde_json::to_string_pretty(&ctx.settings)
                    .map_err(crate::error::ConfigError::from)?;
                println!("{}", json);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", settings_path(custom)?.display());
                Ok(())
            }
            ConfigAction::Init { force } => init(&ctx.settings, custom, *force, ctx.quiet),
        }
    }
}

fn settings_path(custom: Option<&Path>) -> CliResult<PathBuf> {
    match custom {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Paths::get()?.settings_file()),
    }
}

fn init(settings: &AppSettings, custom: Option<&Path>, force: bool, quiet: bool) -> CliResult<()> {
    let path = settings_path(custom)?;

    if path.exists() {
        if !force {
            return Err(CliError::InvalidArgument(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if !quiet {
            output::print_warning(&format!("Overwriting {}", path.display()));
        }
    }

    match custom {
        Some(path) => settings.save_to(path)?,
        None => settings.save()?,
    }

    if !quiet {
        output::print_success(&format!("Settings written to {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        init(&AppSettings::default(), Some(&path), false, true).unwrap();
        assert!(path.exists());

        let result = init(&AppSettings::default(), Some(&path), false, true);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));

        let changed = AppSettings {
            bus: 0,
            ..AppSettings::default()
        };
        init(&changed, Some(&path), true, true).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap().bus, 0);
    }
}
