//! In-memory simulated bus.
//!
//! Holds a register file per attached device and answers the same text
//! formats the `i2c-tools` produce. Used by the test suite and by the CLI's
//! `--simulate` mode.

use crate::detect::render_detect_table;
use crate::error::{TransportError, TransportResult};
use crate::registers::Register;
use crate::transport::traits::BusTransport;
use crate::types::{DeviceAddress, RegisterAddress, RegisterValue};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tracing::debug;

/// Register file of one simulated chip.
type RegisterFile = HashMap<u8, u8>;

/// A simulated I2C bus.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    devices: Mutex<BTreeMap<u8, RegisterFile>>,
    writes: Mutex<Vec<(DeviceAddress, RegisterAddress, RegisterValue)>>,
}

impl MemoryTransport {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an expander at `address` with power-on register values.
    pub fn with_device(self, address: u8) -> Self {
        self.attach(address);
        self
    }

    /// Attach an expander at `address` with power-on register values.
    ///
    /// IODIRA/IODIRB reset to `0xff` (all inputs), everything else to `0x00`.
    pub fn attach(&self, address: u8) {
        let mut file = RegisterFile::new();
        for register in Register::ALL {
            let reset = match register {
                Register::Iodira | Register::Iodirb => 0xff,
                _ => 0x00,
            };
            file.insert(register.address().as_u8(), reset);
        }
        self.lock_devices().insert(address, file);
    }

    /// Overwrite a register without recording a write.
    pub fn poke(&self, address: u8, register: impl Into<RegisterAddress>, value: u8) {
        if let Some(file) = self.lock_devices().get_mut(&address) {
            file.insert(register.into().as_u8(), value);
        }
    }

    /// Current register contents, if the device and register exist.
    pub fn peek(&self, address: u8, register: impl Into<RegisterAddress>) -> Option<u8> {
        let register = register.into().as_u8();
        self.lock_devices()
            .get(&address)
            .and_then(|file| file.get(&register).copied())
    }

    /// Every write performed through the transport, in order.
    pub fn writes(&self) -> Vec<(DeviceAddress, RegisterAddress, RegisterValue)> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_devices(&self) -> std::sync::MutexGuard<'_, BTreeMap<u8, RegisterFile>> {
        self.devices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn device_key(device: &DeviceAddress) -> TransportResult<u8> {
        device
            .to_u8()
            .ok_or_else(|| TransportError::DeviceNotFound(device.to_string()))
    }
}

#[async_trait]
impl BusTransport for MemoryTransport {
    async fn detect(&self) -> TransportResult<String> {
        let present: Vec<u8> = self.lock_devices().keys().copied().collect();
        Ok(render_detect_table(&present))
    }

    async fn read_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
    ) -> TransportResult<String> {
        let key = Self::device_key(device)?;
        let devices = self.lock_devices();
        let file = devices
            .get(&key)
            .ok_or_else(|| TransportError::DeviceNotFound(device.to_string()))?;
        let value = file.get(&register.as_u8()).copied().unwrap_or(0);
        debug!(%device, %register, value, "simulated read");
        Ok(RegisterValue::new(value).to_string())
    }

    async fn write_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
        value: RegisterValue,
    ) -> TransportResult<()> {
        let key = Self::device_key(device)?;
        {
            let mut devices = self.lock_devices();
            let file = devices
                .get_mut(&key)
                .ok_or_else(|| TransportError::DeviceNotFound(device.to_string()))?;
            file.insert(register.as_u8(), value.as_u8());
        }
        debug!(%device, %register, %value, "simulated write");
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((device.clone(), register, value));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::parse_detect_output;

    #[test]
    fn test_detect_lists_attached_devices() {
        let bus = MemoryTransport::new().with_device(0x21).with_device(0x20);
        let table = tokio_test::block_on(bus.detect()).unwrap();
        let found: Vec<String> = parse_detect_output(&table)
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(found, vec!["0x20", "0x21"]);
    }

    #[test]
    fn test_power_on_values() {
        let bus = MemoryTransport::new().with_device(0x20);
        assert_eq!(bus.peek(0x20, Register::Iodira), Some(0xff));
        assert_eq!(bus.peek(0x20, Register::Olatb), Some(0x00));
        assert_eq!(bus.peek(0x21, Register::Olatb), None);
    }

    #[tokio::test]
    async fn test_read_back_write() {
        let bus = MemoryTransport::new().with_device(0x20);
        let device: DeviceAddress = "0x20".parse().unwrap();
        bus.write_register(&device, Register::Olata.address(), RegisterValue::new(0x5a))
            .await
            .unwrap();

        let raw = bus.read_register(&device, Register::Olata.address()).await.unwrap();
        assert_eq!(raw, "0x5a");
        assert_eq!(bus.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_device() {
        let bus = MemoryTransport::new();
        let device: DeviceAddress = "0x27".parse().unwrap();
        let result = bus.read_register(&device, RegisterAddress::new(0)).await;
        assert!(matches!(result, Err(TransportError::DeviceNotFound(_))));

        let claimed = DeviceAddress::from_scan_cell("UU");
        let result = bus.read_register(&claimed, RegisterAddress::new(0)).await;
        assert!(matches!(result, Err(TransportError::DeviceNotFound(_))));
    }
}
