//! `i2c-tools` transport.
//!
//! Runs `i2cdetect`, `i2cget` and `i2cset` as child processes. Every call
//! holds the transport's bus lock for its whole duration, is bounded by a
//! timeout, and has its exit status checked.
//!
//! The calling user needs access to `/dev/i2c-<bus>`, usually through
//! membership of the `i2c` group.

use crate::error::{TransportError, TransportResult};
use crate::transport::traits::BusTransport;
use crate::types::{DeviceAddress, RegisterAddress, RegisterValue};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Programs used for each bus operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub i2cdetect: String,
    pub i2cget: String,
    pub i2cset: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            i2cdetect: "i2cdetect".to_string(),
            i2cget: "i2cget".to_string(),
            i2cset: "i2cset".to_string(),
        }
    }
}

/// Bus transport backed by the `i2c-tools` command-line programs.
///
/// # Characteristics
///
/// - **Bus number**: `1` on current Raspberry Pi models, `0` on the first
///   generation
/// - **Ordering**: one command at a time per transport
/// - **Failure**: non-zero exit, timeout and spawn errors are all reported
pub struct ShellTransport {
    bus: u8,
    timeout: Duration,
    tools: ToolPaths,
    lock: Mutex<()>,
}

impl ShellTransport {
    /// Default per-command timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

    /// Create a transport for `/dev/i2c-<bus>`.
    pub fn new(bus: u8) -> Self {
        Self {
            bus,
            timeout: Self::DEFAULT_TIMEOUT,
            tools: ToolPaths::default(),
            lock: Mutex::new(()),
        }
    }

    /// Set the per-command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the program paths.
    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    /// Bus number passed to every command.
    pub fn bus(&self) -> u8 {
        self.bus
    }

    fn detect_args(&self) -> Vec<String> {
        vec!["-y".to_string(), self.bus.to_string()]
    }

    fn read_args(&self, device: &DeviceAddress, register: RegisterAddress) -> Vec<String> {
        vec![
            "-y".to_string(),
            self.bus.to_string(),
            device.to_string(),
            register.to_string(),
        ]
    }

    fn write_args(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
        value: RegisterValue,
    ) -> Vec<String> {
        vec![
            "-y".to_string(),
            self.bus.to_string(),
            device.to_string(),
            register.to_string(),
            value.to_string(),
        ]
    }

    /// Run one command under the bus lock and return its stdout.
    async fn run(&self, program: &str, args: &[String]) -> TransportResult<String> {
        let _guard = self.lock.lock().await;
        debug!(program, args = %args.join(" "), "running bus command");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                warn!(program, error = %source, "failed to spawn bus command");
                return Err(TransportError::Spawn {
                    program: program.to_string(),
                    source,
                });
            }
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(program, timeout_ms, "bus command timed out");
                return Err(TransportError::Timeout {
                    program: program.to_string(),
                    timeout_ms,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(program, status = %output.status, %stderr, "bus command failed");
            return Err(TransportError::Exited {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for ShellTransport {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
impl BusTransport for ShellTransport {
    async fn detect(&self) -> TransportResult<String> {
        self.run(&self.tools.i2cdetect, &self.detect_args()).await
    }

    async fn read_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
    ) -> TransportResult<String> {
        let output = self
            .run(&self.tools.i2cget, &self.read_args(device, register))
            .await?;
        Ok(output.trim().to_string())
    }

    async fn write_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
        value: RegisterValue,
    ) -> TransportResult<()> {
        self.run(&self.tools.i2cset, &self.write_args(device, register, value))
            .await
            .map(|_| ())
    }

    fn name(&self) -> &'static str {
        "i2c-tools"
    }
}
