//! Application settings and paths.
//!
//! Settings live in `settings.json` under the XDG config directory
//! (`~/.config/mcp23x17` on Linux). A missing file means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::transport::{ShellTransport, ToolPaths};
use crate::types::DeviceAddress;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Global paths singleton.
static PATHS: OnceLock<Paths> = OnceLock::new();

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/mcp23x17)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Get the global paths instance.
    pub fn get() -> ConfigResult<&'static Paths> {
        if let Some(paths) = PATHS.get() {
            return Ok(paths);
        }
        let paths = Self::new()?;
        Ok(PATHS.get_or_init(|| paths))
    }

    fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "mcp23x17", "mcp23x17")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// I2C bus number (`/dev/i2c-<bus>`).
    pub bus: u8,
    /// Default chip address.
    pub device: String,
    /// Per-command timeout in milliseconds.
    pub timeout_ms: u64,
    /// Programs used to reach the bus.
    pub tools: ToolPaths,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bus: 1,
            device: DeviceAddress::default().to_string(),
            timeout_ms: ShellTransport::DEFAULT_TIMEOUT.as_millis() as u64,
            tools: ToolPaths::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::get()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.device_address()?;
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        let paths = Paths::get()?;
        fs::create_dir_all(&paths.config_dir)?;
        self.save_to(&paths.settings_file())
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The configured chip address, validated.
    pub fn device_address(&self) -> ConfigResult<DeviceAddress> {
        self.device
            .parse()
            .map_err(|e: crate::types::AddressError| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Per-command timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build a shell transport from these settings.
    pub fn shell_transport(&self) -> ShellTransport {
        ShellTransport::new(self.bus)
            .with_timeout(self.timeout())
            .with_tools(self.tools.clone())
    }
}
