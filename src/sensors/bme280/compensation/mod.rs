//! Fixed-point compensation of raw BME280/BMP280 ADC codes.
//!
//! The formulas reproduce the vendor's integer reference (64-bit pressure
//! variant) so results are bit-identical to it. Every intermediate is carried in
//! `i64`; the few steps where the reference relies on 64-bit wrap-around use
//! wrapping arithmetic instead of panicking.
//!
//! Order matters: temperature produces `t_fine`, which feeds both pressure and
//! humidity.
use crate::error::{CompensationError, DecodeError};
use crate::infra::codec::endian::{pack_adc16, pack_adc20};
use crate::infra::codec::traits::FromRegisters;
use crate::protocol::transport::register_bus::RegisterBus;
use crate::protocol::transport::traits::transport::Transport;
use crate::sensors::bme280::calibration::CalibrationTable;
use crate::sensors::bme280::registers::{DATA_BURST, DATA_BURST_WITH_HUMIDITY};

/// Upper clamp of the humidity accumulator: 100 %RH in Q22.10 before the final shift.
const HUMIDITY_CLAMP: i64 = 419_430_400;

//==================================================================================RAW_SAMPLE
/// Raw ADC codes of one measurement burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// 20-bit pressure code.
    pub adc_pressure: u32,
    /// 20-bit temperature code.
    pub adc_temperature: u32,
    /// 16-bit humidity code; `None` on parts without a humidity channel.
    pub adc_humidity: Option<u32>,
}

impl FromRegisters for RawSample {
    /// Accepts the 8-byte BME280 burst (0xF7..0xFE) or the 6-byte BMP280 one.
    fn from_registers(bytes: &[u8]) -> Result<Self, DecodeError> {
        let adc_humidity = if bytes.len() == DATA_BURST.len {
            None
        } else {
            DATA_BURST_WITH_HUMIDITY.check(bytes)?;
            Some(pack_adc16(bytes[6], bytes[7]))
        };
        Ok(Self {
            adc_pressure: pack_adc20(bytes[0], bytes[1], bytes[2]),
            adc_temperature: pack_adc20(bytes[3], bytes[4], bytes[5]),
            adc_humidity,
        })
    }
}

//==================================================================================READINGS
/// Exact integer outputs of the compensation formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedPointReading {
    /// Fine temperature shared with the pressure and humidity formulas.
    pub t_fine: i32,
    /// Temperature in hundredths of a degree Celsius.
    pub temperature_centi: i32,
    /// Pressure in Pa as unsigned Q24.8 (divide by 256).
    pub pressure_q24_8: u32,
    /// Relative humidity in %RH as unsigned Q22.10 (divide by 1024).
    pub humidity_q22_10: Option<u32>,
}

impl FixedPointReading {
    pub fn to_reading(&self) -> CompensatedReading {
        CompensatedReading {
            temperature_celsius: self.temperature_centi as f64 / 100.0,
            pressure_pascals: self.pressure_q24_8 as f64 / 256.0,
            humidity_percent: self.humidity_q22_10.map(|h| h as f64 / 1024.0),
        }
    }
}

/// Calibrated physical quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedReading {
    pub temperature_celsius: f64,
    pub pressure_pascals: f64,
    /// `None` on parts without a humidity channel.
    pub humidity_percent: Option<f64>,
}

//==================================================================================FORMULAS
/// Temperature step: returns `(t_fine, temperature in 0.01 °C)`.
pub fn compensate_temperature(adc_t: u32, calib: &CalibrationTable) -> (i32, i32) {
    let adc = adc_t as i64;
    let t1 = calib.dig_t1 as i64;
    let t2 = calib.dig_t2 as i64;
    let t3 = calib.dig_t3 as i64;

    let var1 = (((adc >> 3) - (t1 << 1)) * t2) >> 11;
    let delta = (adc >> 4) - t1;
    let var2 = (((delta * delta) >> 12) * t3) >> 14;

    let t_fine = (var1 + var2) as i32;
    let centi = (t_fine as i64 * 5 + 128) >> 8;
    (t_fine, centi as i32)
}

/// Pressure step: Pa in Q24.8. A zero denominator (uncalibrated part) yields 0.
pub fn compensate_pressure(adc_p: u32, t_fine: i32, calib: &CalibrationTable) -> u32 {
    let p1 = calib.dig_p1 as i64;
    let p2 = calib.dig_p2 as i64;
    let p3 = calib.dig_p3 as i64;
    let p4 = calib.dig_p4 as i64;
    let p5 = calib.dig_p5 as i64;
    let p6 = calib.dig_p6 as i64;
    let p7 = calib.dig_p7 as i64;
    let p8 = calib.dig_p8 as i64;
    let p9 = calib.dig_p9 as i64;

    let mut var1 = t_fine as i64 - 128_000;
    let mut var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
    var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
    var2 = var2.wrapping_add(p4 << 35);
    var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8).wrapping_add(var1.wrapping_mul(p2) << 12);
    var1 = ((1i64 << 47).wrapping_add(var1)).wrapping_mul(p1) >> 33;
    if var1 == 0 {
        return 0;
    }

    let mut pressure = 1_048_576 - adc_p as i64;
    pressure = ((pressure << 31).wrapping_sub(var2))
        .wrapping_mul(3125)
        .wrapping_div(var1);
    var1 = p9.wrapping_mul(pressure >> 13).wrapping_mul(pressure >> 13) >> 25;
    var2 = p8.wrapping_mul(pressure) >> 19;
    pressure = (pressure.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4);
    pressure as u32
}

/// Humidity step: %RH in Q22.10, clamped to [0, 100 %].
pub fn compensate_humidity(adc_h: u32, t_fine: i32, calib: &CalibrationTable) -> u32 {
    let adc = adc_h as i64;
    let h1 = calib.dig_h1 as i64;
    let h2 = calib.dig_h2 as i64;
    let h3 = calib.dig_h3 as i64;
    let h4 = calib.dig_h4 as i64;
    let h5 = calib.dig_h5 as i64;
    let h6 = calib.dig_h6 as i64;

    let mut v = t_fine as i64 - 76_800;
    let offset = ((adc << 14) - (h4 << 20) - h5 * v + 16_384) >> 15;
    let scale = (((((((v * h6) >> 10) * (((v * h3) >> 11) + 32_768)) >> 10) + 2_097_152) * h2)
        + 8_192)
        >> 14;
    v = offset.wrapping_mul(scale);

    let square = (v >> 15).wrapping_mul(v >> 15) >> 7;
    v = v.wrapping_sub(square.wrapping_mul(h1) >> 4);
    (v.clamp(0, HUMIDITY_CLAMP) >> 12) as u32
}

/// Run the three formulas on one sample and keep the integer results.
pub fn compensate_fixed(raw: &RawSample, calib: &CalibrationTable) -> FixedPointReading {
    let (t_fine, temperature_centi) = compensate_temperature(raw.adc_temperature, calib);
    FixedPointReading {
        t_fine,
        temperature_centi,
        pressure_q24_8: compensate_pressure(raw.adc_pressure, t_fine, calib),
        humidity_q22_10: raw
            .adc_humidity
            .map(|adc_h| compensate_humidity(adc_h, t_fine, calib)),
    }
}

/// Pure compensation: identical inputs always give identical outputs.
pub fn compensate(raw: &RawSample, calib: &CalibrationTable) -> CompensatedReading {
    compensate_fixed(raw, calib).to_reading()
}

//==================================================================================ENGINE
/// Holds the calibration table of one device and applies it to raw samples.
///
/// Lifecycle: `new` (uncalibrated) → `load_calibration` (once) → `compensate`
/// (any number of times).
#[derive(Debug, Clone, Default)]
pub struct CompensationEngine {
    calibration: Option<CalibrationTable>,
}

impl CompensationEngine {
    pub const fn new() -> Self {
        Self { calibration: None }
    }

    /// Engine built around an already known table.
    pub const fn with_calibration(calibration: CalibrationTable) -> Self {
        Self {
            calibration: Some(calibration),
        }
    }

    /// Read the calibration table from the device. Refused once loaded.
    pub fn load_calibration<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<T>,
    ) -> Result<&CalibrationTable, CompensationError> {
        if self.calibration.is_some() {
            return Err(CompensationError::AlreadyCalibrated);
        }
        let table = CalibrationTable::load(bus)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Calibration loaded: {}", table);
        Ok(self.calibration.insert(table))
    }

    pub fn calibration(&self) -> Option<&CalibrationTable> {
        self.calibration.as_ref()
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    pub fn compensate(&self, raw: &RawSample) -> Result<CompensatedReading, CompensationError> {
        self.compensate_fixed(raw).map(|fixed| fixed.to_reading())
    }

    pub fn compensate_fixed(&self, raw: &RawSample) -> Result<FixedPointReading, CompensationError> {
        let calib = self
            .calibration
            .as_ref()
            .ok_or(CompensationError::NotCalibrated)?;
        Ok(compensate_fixed(raw, calib))
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
