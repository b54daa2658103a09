//! [`Transport`] executor over an `embedded-hal` 1.0 I2C bus: device address and
//! bus speed are fixed per instance, each phase list becomes one I2C transaction
//! (repeated START between phases, single STOP at the end).
use embedded_hal::i2c::{I2c, Operation};
use heapless::Vec;

use crate::core::{expected_len, Phase, TransactionResult};
use crate::protocol::transport::traits::transport::Transport;

/// Largest phase list forwarded as a generic I2C transaction.
const MAX_PHASES: usize = 4;

/// I2C device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// 7-bit device address.
    pub address: u8,
    /// Bus frequency in Hz (informational: the HAL owns clock setup).
    pub frequency_hz: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            address: 0x76,
            frequency_hz: 100_000,
        }
    }
}

/// I2C transport bound to one device address.
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    bus: I2C,
    config: I2cConfig,
}

impl<I2C: I2c> I2cTransport<I2C> {
    pub fn new(bus: I2C, config: I2cConfig) -> Self {
        Self { bus, config }
    }

    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Give the HAL bus back.
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        let expected = expected_len(phases);
        let address = self.config.address;

        let outcome = match phases {
            [Phase::Write(bytes)] => self.bus.write(address, bytes),
            [Phase::Read(buffer)] => self.bus.read(address, buffer),
            [Phase::Write(bytes), Phase::Read(buffer)] => {
                self.bus.write_read(address, bytes, buffer)
            }
            _ => {
                let mut operations: Vec<Operation<'_>, MAX_PHASES> = Vec::new();
                for phase in phases.iter_mut() {
                    let operation = match phase {
                        Phase::Write(bytes) => Operation::Write(bytes),
                        Phase::Read(buffer) => Operation::Read(buffer),
                    };
                    if operations.push(operation).is_err() {
                        return TransactionResult::failed();
                    }
                }
                self.bus.transaction(address, &mut operations)
            }
        };

        match outcome {
            Ok(()) => TransactionResult::completed(expected),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("I2C transaction to {=u8:#x} failed", address);
                TransactionResult::failed()
            }
        }
    }
}
