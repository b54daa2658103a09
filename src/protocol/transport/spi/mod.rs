//! [`Transport`] executor over an `embedded-hal` 1.0 SPI device. Chip-select is
//! owned by the [`SpiDevice`] and held for the whole phase list.
//!
//! Register-style SPI peripherals encode the access direction in the address
//! byte; [`SpiConfig`] carries that convention so the register API stays
//! identical to the I2C one from the caller's side.
use embedded_hal::spi::{Mode, Operation, SpiDevice, MODE_0};
use heapless::Vec;

use crate::core::{expected_len, Phase, RegisterAccess, RegisterAddress, TransactionResult};
use crate::protocol::transport::traits::transport::Transport;

const MAX_PHASES: usize = 4;

/// SPI device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    /// Clock polarity/phase (informational: the HAL owns bus setup).
    pub mode: Mode,
    /// Bus frequency in Hz (informational).
    pub frequency_hz: u32,
    /// OR-ed into the register address of read accesses.
    pub read_flag: u8,
    /// AND-ed into the register address of write accesses.
    pub write_mask: u8,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            mode: MODE_0,
            frequency_hz: 1_000_000,
            read_flag: 0x80,
            write_mask: 0x7F,
        }
    }
}

/// SPI transport bound to one chip-select.
#[derive(Debug)]
pub struct SpiTransport<SPI> {
    device: SPI,
    config: SpiConfig,
}

impl<SPI: SpiDevice> SpiTransport<SPI> {
    pub fn new(device: SPI, config: SpiConfig) -> Self {
        Self { device, config }
    }

    pub fn config(&self) -> &SpiConfig {
        &self.config
    }

    /// Give the HAL device back.
    pub fn release(self) -> SPI {
        self.device
    }
}

impl<SPI: SpiDevice> Transport for SpiTransport<SPI> {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        let expected = expected_len(phases);

        let mut operations: Vec<Operation<'_, u8>, MAX_PHASES> = Vec::new();
        for phase in phases.iter_mut() {
            let operation = match phase {
                Phase::Write(bytes) => Operation::Write(bytes),
                Phase::Read(buffer) => Operation::Read(buffer),
            };
            if operations.push(operation).is_err() {
                return TransactionResult::failed();
            }
        }

        match self.device.transaction(&mut operations) {
            Ok(()) => TransactionResult::completed(expected),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("SPI transaction failed");
                TransactionResult::failed()
            }
        }
    }

    fn register_address(&self, address: RegisterAddress, access: RegisterAccess) -> u8 {
        match access {
            RegisterAccess::Read => address | self.config.read_flag,
            RegisterAccess::Write => address & self.config.write_mask,
        }
    }
}
