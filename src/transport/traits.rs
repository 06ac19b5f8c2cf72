//! Bus transport trait abstraction.
//!
//! Defines the three bus operations the expander needs, so the same chip
//! logic runs against the real `i2c-tools` or a simulated bus.

use crate::error::TransportResult;
use crate::types::{DeviceAddress, RegisterAddress, RegisterValue};
use async_trait::async_trait;

/// Trait for I2C bus access.
///
/// Implementations must not run more than one transaction on the same
/// physical bus at a time.
///
/// # Example
///
/// ```ignore
/// use mcp23x17::transport::BusTransport;
///
/// async fn dump<T: BusTransport>(bus: &T) -> String {
///     bus.detect().await.unwrap_or_default()
/// }
/// ```
#[async_trait]
pub trait BusTransport: Send + Sync {
    /// Scan the bus and return the raw `i2cdetect` table.
    async fn detect(&self) -> TransportResult<String>;

    /// Read one register and return the trimmed raw output, e.g. `0x1f`.
    async fn read_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
    ) -> TransportResult<String>;

    /// Write one register.
    async fn write_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
        value: RegisterValue,
    ) -> TransportResult<()>;

    /// Short name for log output.
    fn name(&self) -> &'static str;
}

/// A boxed transport for dynamic dispatch.
pub type BoxedTransport = Box<dyn BusTransport>;

#[async_trait]
impl<T: BusTransport + ?Sized> BusTransport for Box<T> {
    async fn detect(&self) -> TransportResult<String> {
        (**self).detect().await
    }

    async fn read_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
    ) -> TransportResult<String> {
        (**self).read_register(device, register).await
    }

    async fn write_register(
        &self,
        device: &DeviceAddress,
        register: RegisterAddress,
        value: RegisterValue,
    ) -> TransportResult<()> {
        (**self).write_register(device, register, value).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
