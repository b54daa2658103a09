//! BME280/BMP280 register map (Bosch Sensortec datasheets, BME280 rev 1.6,
//! BMP280 rev 1.26). Every multi-byte register auto-increments on burst reads.
use crate::core::RegisterAddress;
use crate::infra::codec::traits::RegisterBlock;

/// Default I2C address (SDO to GND); 0x77 with SDO to VDDIO.
pub const I2C_ADDRESS_PRIMARY: u8 = 0x76;
pub const I2C_ADDRESS_SECONDARY: u8 = 0x77;

pub const REG_CHIP_ID: RegisterAddress = 0xD0;
pub const REG_RESET: RegisterAddress = 0xE0;
pub const REG_CTRL_HUM: RegisterAddress = 0xF2;
pub const REG_STATUS: RegisterAddress = 0xF3;
pub const REG_CTRL_MEAS: RegisterAddress = 0xF4;
pub const REG_CONFIG: RegisterAddress = 0xF5;
/// First byte of the measurement burst: press_msb.
pub const REG_DATA: RegisterAddress = 0xF7;

pub const CHIP_ID_BME280: u8 = 0x60;
pub const CHIP_ID_BMP280: u8 = 0x58;

/// Written to [`REG_RESET`] to trigger a power-on reset.
pub const RESET_COMMAND: u8 = 0xB6;

/// `status.measuring`: a conversion is running.
pub const STATUS_MEASURING: u8 = 1 << 3;
/// `status.im_update`: NVM calibration data is being copied.
pub const STATUS_IM_UPDATE: u8 = 1 << 0;

/// dig_T1..dig_T3, dig_P1..dig_P9.
pub const CALIB_TEMP_PRESS: RegisterBlock = RegisterBlock::new(0x88, 24);
/// dig_H1.
pub const CALIB_HUM_H1: RegisterBlock = RegisterBlock::new(0xA1, 1);
/// dig_H2..dig_H6, with H4/H5 sharing register 0xE5.
pub const CALIB_HUM_REST: RegisterBlock = RegisterBlock::new(0xE1, 7);

/// Pressure, temperature and humidity ADC values (BME280).
pub const DATA_BURST_WITH_HUMIDITY: RegisterBlock = RegisterBlock::new(REG_DATA, 8);
/// Pressure and temperature ADC values (BMP280).
pub const DATA_BURST: RegisterBlock = RegisterBlock::new(REG_DATA, 6);
