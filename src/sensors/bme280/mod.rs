//! Bosch BME280 (pressure, temperature, humidity) and BMP280 (pressure,
//! temperature) driver over any [`Transport`].
//!
//! Bring-up sequence:
//! 1. read the chip id to identify the part;
//! 2. soft reset and wait for the NVM copy (`status.im_update`) to finish;
//! 3. load the calibration table once;
//! 4. with the part asleep, write ctrl_hum and config, then ctrl_meas (ctrl_hum
//!    only latches on a ctrl_meas write; config writes are ignored in normal mode).
//!
//! Every wait is a bounded poll with an explicit sleep between attempts.
use embedded_hal::delay::DelayNs;

use crate::error::{CompensationError, SensorError};
use crate::infra::codec::traits::FromRegisters;
use crate::protocol::transport::register_bus::RegisterBus;
use crate::protocol::transport::traits::transport::Transport;

pub mod calibration;
pub mod compensation;
pub mod config;
pub mod registers;

use calibration::CalibrationTable;
use compensation::{CompensatedReading, CompensationEngine, RawSample};
use config::{Bme280Config, SensorMode};
use registers::*;

/// Status polls while the reset NVM copy runs (1 ms apart).
pub const NVM_COPY_POLL_LIMIT: u32 = 10;
/// Extra status polls after the worst-case conversion time (1 ms apart).
pub const CONVERSION_POLL_LIMIT: u32 = 20;
/// Power-on reset duration before the status register answers.
const RESET_DELAY_MS: u32 = 2;

/// Identified part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipVariant {
    /// Chip id 0x60, with humidity.
    Bme280,
    /// Chip id 0x58, pressure and temperature only.
    Bmp280,
}

impl ChipVariant {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            CHIP_ID_BME280 => Some(Self::Bme280),
            CHIP_ID_BMP280 => Some(Self::Bmp280),
            _ => None,
        }
    }

    pub fn has_humidity(self) -> bool {
        self == Self::Bme280
    }

    /// Length of the measurement burst starting at [`REG_DATA`].
    pub fn burst_len(self) -> usize {
        match self {
            Self::Bme280 => DATA_BURST_WITH_HUMIDITY.len,
            Self::Bmp280 => DATA_BURST.len,
        }
    }
}

/// BME280/BMP280 device on a register bus.
pub struct Bme280<T: Transport> {
    bus: RegisterBus<T>,
    config: Bme280Config,
    engine: CompensationEngine,
    variant: Option<ChipVariant>,
}

impl<T: Transport> Bme280<T> {
    pub fn new(transport: T, config: Bme280Config) -> Self {
        Self::from_bus(RegisterBus::new(transport), config)
    }

    pub fn from_bus(bus: RegisterBus<T>, config: Bme280Config) -> Self {
        Self {
            bus,
            config,
            engine: CompensationEngine::new(),
            variant: None,
        }
    }

    /// Identify, reset, calibrate and configure the part.
    ///
    /// Safe to call again, after a failure or on a running part: the reset
    /// discards the previous bring-up, calibration included.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<ChipVariant, SensorError> {
        self.engine = CompensationEngine::new();
        self.variant = None;

        let id = self.bus.read_register(REG_CHIP_ID)?;
        let variant = ChipVariant::from_id(id).ok_or(SensorError::UnsupportedChip { id })?;

        #[cfg(feature = "defmt")]
        defmt::info!("Found {} (chip id {=u8:#x})", variant, id);

        self.bus.write_register(REG_RESET, RESET_COMMAND)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.wait_status_clear(
            delay,
            STATUS_IM_UPDATE,
            NVM_COPY_POLL_LIMIT,
            SensorError::NvmCopyTimeout,
        )?;

        self.engine.load_calibration(&mut self.bus)?;
        self.write_config(variant)?;
        // Only a fully configured part is ready to measure.
        self.variant = Some(variant);
        Ok(variant)
    }

    /// Replace the configuration and write it to the device.
    pub fn set_config(&mut self, config: Bme280Config) -> Result<(), SensorError> {
        let variant = self.variant()?;
        self.config = config;
        self.write_config(variant)
    }

    fn write_config(&mut self, variant: ChipVariant) -> Result<(), SensorError> {
        self.bus
            .write_register(REG_CTRL_MEAS, self.config.ctrl_meas_sleep())?;
        if variant.has_humidity() {
            self.bus.write_register(REG_CTRL_HUM, self.config.ctrl_hum())?;
        }
        self.bus.write_register(REG_CONFIG, self.config.config())?;
        // Forced mode starts on demand in `measure`.
        if self.config.mode == SensorMode::Normal {
            self.bus.write_register(REG_CTRL_MEAS, self.config.ctrl_meas())?;
        }
        Ok(())
    }

    /// Take one compensated reading. In forced mode this triggers the conversion
    /// and waits for it; in normal mode it reads the latest completed one.
    ///
    /// Sleep mode never converts, so it is refused instead of returning stale data.
    pub fn measure<D: DelayNs>(&mut self, delay: &mut D) -> Result<CompensatedReading, SensorError> {
        let variant = self.variant()?;
        if self.config.mode == SensorMode::Sleep {
            return Err(SensorError::Asleep);
        }
        if self.config.mode == SensorMode::Forced {
            self.bus.write_register(REG_CTRL_MEAS, self.config.ctrl_meas())?;
            delay.delay_us(self.config.max_measurement_time_us(variant.has_humidity()));
            self.wait_status_clear(
                delay,
                STATUS_MEASURING,
                CONVERSION_POLL_LIMIT,
                SensorError::ConversionTimeout,
            )?;
        }
        let raw = self.read_raw()?;
        Ok(self.engine.compensate(&raw)?)
    }

    /// Read the raw ADC burst without compensating it.
    pub fn read_raw(&mut self) -> Result<RawSample, SensorError> {
        let len = self.variant()?.burst_len();
        let mut burst = [0u8; DATA_BURST_WITH_HUMIDITY.len];
        self.bus.read_registers(REG_DATA, &mut burst[..len])?;
        Ok(RawSample::from_registers(&burst[..len])?)
    }

    fn wait_status_clear<D: DelayNs>(
        &mut self,
        delay: &mut D,
        mask: u8,
        polls: u32,
        timeout: SensorError,
    ) -> Result<(), SensorError> {
        for _ in 0..polls {
            if self.bus.read_register(REG_STATUS)? & mask == 0 {
                return Ok(());
            }
            delay.delay_ms(1);
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("Status bit {=u8:#x} still set after {=u32} polls", mask, polls);
        Err(timeout)
    }

    fn variant(&self) -> Result<ChipVariant, SensorError> {
        self.variant
            .ok_or(SensorError::Compensation(CompensationError::NotCalibrated))
    }

    /// Part identified by [`init`](Self::init).
    pub fn chip(&self) -> Option<ChipVariant> {
        self.variant
    }

    pub fn config(&self) -> &Bme280Config {
        &self.config
    }

    pub fn calibration(&self) -> Option<&CalibrationTable> {
        self.engine.calibration()
    }

    pub fn bus_mut(&mut self) -> &mut RegisterBus<T> {
        &mut self.bus
    }

    /// Give the transport back.
    pub fn release(self) -> T {
        self.bus.release()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
