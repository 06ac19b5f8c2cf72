//! Chip-level access to one MCP23x17.
//!
//! [`Expander`] owns a bus transport and the chip's bus address, and turns
//! register-level requests into transport calls. Everything it reads back
//! goes through the codec and port-state splitter.

use crate::codec::{binary8_to_value, hex_to_binary8};
use crate::detect::parse_detect_output;
use crate::error::{ExpanderError, ExpanderResult, TransportError};
use crate::port_state::PortState;
use crate::registers::Register;
use crate::transport::BusTransport;
use crate::types::{DeviceAddress, Direction, Port, RegisterAddress, RegisterValue};
use tracing::{debug, info};

/// An MCP23x17 reachable through a bus transport.
///
/// # Example
///
/// ```ignore
/// use mcp23x17::{Expander, Port};
/// use mcp23x17::transport::ShellTransport;
///
/// let chip = Expander::new(ShellTransport::new(1), "0x20".parse()?);
/// chip.set_port_direction(Port::A, 0x00.into()).await?;
/// chip.set_pin(Port::A, 3, true).await?;
/// ```
pub struct Expander<T: BusTransport> {
    transport: T,
    address: DeviceAddress,
}

impl<T: BusTransport> Expander<T> {
    /// Create an expander at `address` on `transport`.
    pub fn new(transport: T, address: DeviceAddress) -> Self {
        Self { transport, address }
    }

    /// The chip's bus address.
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Point this handle at a different chip on the same bus.
    pub fn set_address(&mut self, address: DeviceAddress) {
        self.address = address;
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Scan the bus for devices.
    pub async fn detect_devices(&self) -> ExpanderResult<Vec<DeviceAddress>> {
        let raw = self.transport.detect().await?;
        let devices = parse_detect_output(&raw);
        info!(count = devices.len(), transport = self.transport.name(), "bus scan complete");
        Ok(devices)
    }

    /// Read a register.
    pub async fn read_register(
        &self,
        register: impl Into<RegisterAddress>,
    ) -> ExpanderResult<RegisterValue> {
        let register = register.into();
        let raw = self.transport.read_register(&self.address, register).await?;
        let value = raw.parse::<RegisterValue>().map_err(|_| {
            ExpanderError::Transport(TransportError::Unparsable {
                program: self.transport.name().to_string(),
                output: raw.clone(),
            })
        })?;
        debug!(device = %self.address, %register, %value, "register read");
        Ok(value)
    }

    /// Read a register and decode it to its 8 character binary form.
    pub async fn read_register_binary(
        &self,
        register: impl Into<RegisterAddress>,
    ) -> ExpanderResult<String> {
        let value = self.read_register(register).await?;
        Ok(hex_to_binary8(&value.to_string())?)
    }

    /// Write a register.
    pub async fn write_register(
        &self,
        register: impl Into<RegisterAddress>,
        value: RegisterValue,
    ) -> ExpanderResult<()> {
        let register = register.into();
        self.transport
            .write_register(&self.address, register, value)
            .await?;
        debug!(device = %self.address, %register, %value, "register written");
        Ok(())
    }

    /// Write an I/O direction register (IODIRA or IODIRB).
    ///
    /// Bit value 1 makes a pin an input, 0 an output.
    pub async fn set_io_direction(
        &self,
        register: impl Into<RegisterAddress>,
        direction: RegisterValue,
    ) -> ExpanderResult<()> {
        self.write_register(register, direction).await
    }

    /// Set the direction of a whole port.
    pub async fn set_port_direction(
        &self,
        port: Port,
        direction: RegisterValue,
    ) -> ExpanderResult<()> {
        self.set_io_direction(Register::iodir(port), direction).await
    }

    /// Current direction of one pin.
    pub async fn pin_direction(&self, port: Port, pin: u8) -> ExpanderResult<Direction> {
        check_pin(pin)?;
        let iodir = self.read_register(Register::iodir(port)).await?;
        Ok(Direction::from_bit(iodir.bit(pin)))
    }

    /// Make one pin an input or an output, leaving the rest of the port alone.
    pub async fn set_pin_direction(
        &self,
        port: Port,
        pin: u8,
        direction: Direction,
    ) -> ExpanderResult<RegisterValue> {
        check_pin(pin)?;
        let register = Register::iodir(port);
        let current = self.read_register(register).await?;
        let next = current.with_bit(pin, direction.is_input());
        if next != current {
            self.write_register(register, next).await?;
        }
        info!(device = %self.address, %port, pin, %direction, "pin direction set");
        Ok(next)
    }

    /// Read the input level of one pin from GPIOx.
    pub async fn read_pin(&self, port: Port, pin: u8) -> ExpanderResult<bool> {
        check_pin(pin)?;
        let value = self.read_register(Register::gpio(port)).await?;
        Ok(value.bit(pin))
    }

    /// Read a port's GPIO register and split it into pin fields.
    pub async fn read_port_state(&self, port: Port) -> ExpanderResult<PortState> {
        let binary = self.read_register_binary(Register::gpio(port)).await?;
        Ok(PortState::new(port, &binary)?)
    }

    /// Drive a port's outputs from an 8 character binary string.
    pub async fn write_port_state(&self, port: Port, binary: &str) -> ExpanderResult<()> {
        let state = PortState::new(port, binary)?;
        let value = binary8_to_value(&state.to_string())?;
        self.write_register(Register::olat(port), RegisterValue::new(value))
            .await
    }

    /// Drive a single output pin high or low.
    ///
    /// `pin` is the electrical pin number (GPx0 = 0 ... GPx7 = 7). The other
    /// bits of the output latch are preserved.
    pub async fn set_pin(&self, port: Port, pin: u8, high: bool) -> ExpanderResult<RegisterValue> {
        check_pin(pin)?;

        let latch = Register::olat(port);
        let current = self.read_register(latch).await?;
        let next = current.with_bit(pin, high);
        if next != current {
            self.write_register(latch, next).await?;
        }
        info!(device = %self.address, %port, pin, high, "pin set");
        Ok(next)
    }
}

fn check_pin(pin: u8) -> ExpanderResult<()> {
    if pin > 7 {
        return Err(ExpanderError::InvalidPin(pin));
    }
    Ok(())
}
