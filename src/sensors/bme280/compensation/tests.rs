//! Compensation tests against the datasheet reference calibration.
use super::*;
use crate::core::{Phase, TransactionResult};
use crate::error::BusError;

/// Datasheet example trimming values, plus a typical humidity set.
fn reference_calibration() -> CalibrationTable {
    CalibrationTable {
        dig_t1: 27504,
        dig_t2: 26435,
        dig_t3: -1000,
        dig_p1: 36477,
        dig_p2: -10685,
        dig_p3: 3024,
        dig_p4: 2855,
        dig_p5: 140,
        dig_p6: -7,
        dig_p7: 15500,
        dig_p8: -14600,
        dig_p9: 6000,
        dig_h1: 75,
        dig_h2: 362,
        dig_h3: 0,
        dig_h4: 313,
        dig_h5: 50,
        dig_h6: 30,
    }
}

/// Raw calibration registers encoding [`reference_calibration`].
const TEMP_PRESS_BLOCK: [u8; 24] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C,
    0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
];
const H1_BLOCK: [u8; 1] = [75];
const HUMIDITY_BLOCK: [u8; 7] = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];

/// adc_P = 415148, adc_T = 519888, adc_H = 30000.
const BURST: [u8; 8] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x30];

//==================================================================================CALIBRATION
#[test]
/// Little-endian words and the nibble-shared H4/H5 registers.
fn test_calibration_from_blocks() {
    let table = CalibrationTable::from_blocks(&TEMP_PRESS_BLOCK, &H1_BLOCK, &HUMIDITY_BLOCK);
    assert_eq!(table, reference_calibration());
}

#[test]
/// H4/H5 are sign-extended from 12 bits.
fn test_negative_h4_h5() {
    let humidity = [0x00, 0x80, 0xFF, 0x80, 0x00, 0x80, 0x80];
    let table = CalibrationTable::from_blocks(&TEMP_PRESS_BLOCK, &[0], &humidity);
    assert_eq!(table.dig_h2, i16::MIN);
    assert_eq!(table.dig_h3, 255);
    assert_eq!(table.dig_h4, -2048);
    assert_eq!(table.dig_h5, -2048);
    assert_eq!(table.dig_h6, -128);
}

//==================================================================================RAW_SAMPLE
#[test]
/// 20-bit codes keep the XLSB upper nibble; humidity is big-endian.
fn test_raw_sample_from_burst() {
    let raw = RawSample::from_registers(&BURST).unwrap();
    assert_eq!(
        raw,
        RawSample {
            adc_pressure: 415148,
            adc_temperature: 519888,
            adc_humidity: Some(30000),
        }
    );

    let bmp = RawSample::from_registers(&BURST[..6]).unwrap();
    assert_eq!(bmp.adc_humidity, None);

    assert_eq!(
        RawSample::from_registers(&BURST[..7]),
        Err(DecodeError::InvalidBlockLength {
            expected: 8,
            actual: 7,
        })
    );

    let mut long = [0u8; 9];
    long[..8].copy_from_slice(&BURST);
    assert_eq!(
        RawSample::from_registers(&long),
        Err(DecodeError::InvalidBlockLength {
            expected: 8,
            actual: 9,
        })
    );
}

//==================================================================================FORMULAS
#[test]
/// Datasheet temperature vector: 25.08 °C.
fn test_temperature_reference() {
    let (t_fine, centi) = compensate_temperature(519888, &reference_calibration());
    assert_eq!(t_fine, 128422);
    assert_eq!(centi, 2508);
}

#[test]
/// Datasheet pressure vector, bit-exact Q24.8.
fn test_pressure_reference() {
    let pressure = compensate_pressure(415148, 128422, &reference_calibration());
    assert_eq!(pressure, 25767233);
    assert_eq!(pressure as f64 / 256.0, 100653.25390625);
}

#[test]
/// A zero dig_P1 makes the denominator vanish; the result is 0, not a panic.
fn test_pressure_zero_denominator() {
    let calib = CalibrationTable {
        dig_p1: 0,
        ..reference_calibration()
    };
    assert_eq!(compensate_pressure(415148, 128422, &calib), 0);
}

#[test]
/// Humidity in Q22.10 at the reference temperature.
fn test_humidity_reference() {
    let calib = reference_calibration();
    assert_eq!(compensate_humidity(30000, 128422, &calib), 56317);
    assert_eq!(compensate_humidity(28000, 128422, &calib), 44909);
}

#[test]
/// Out-of-range accumulators clamp to exactly 0 % and 100 %.
fn test_humidity_clamps() {
    let calib = reference_calibration();
    assert_eq!(compensate_humidity(0, 128422, &calib), 0);
    assert_eq!(compensate_humidity(65535, 128422, &calib), 100 * 1024);
}

#[test]
/// Extreme coefficients overflow 32-bit intermediates; the result still clamps.
fn test_humidity_extreme_coefficients() {
    let calib = CalibrationTable {
        dig_h1: 0,
        dig_h2: i16::MAX,
        dig_h3: u8::MAX,
        dig_h4: -2048,
        dig_h5: -2048,
        dig_h6: i8::MAX,
        ..reference_calibration()
    };
    assert_eq!(compensate_humidity(65535, 128422, &calib), 100 * 1024);
}

#[test]
/// Full pipeline on the reference burst.
fn test_compensate_reference() {
    let raw = RawSample::from_registers(&BURST).unwrap();
    let fixed = compensate_fixed(&raw, &reference_calibration());
    assert_eq!(
        fixed,
        FixedPointReading {
            t_fine: 128422,
            temperature_centi: 2508,
            pressure_q24_8: 25767233,
            humidity_q22_10: Some(56317),
        }
    );

    let reading = compensate(&raw, &reference_calibration());
    assert_eq!(reading.temperature_celsius, 25.08);
    assert_eq!(reading.pressure_pascals, 100653.25390625);
    assert_eq!(reading.humidity_percent, Some(56317.0 / 1024.0));
    assert!((reading.pressure_pascals - 100653.27).abs() < 0.05);
}

#[test]
/// Same inputs, same outputs.
fn test_compensate_is_pure() {
    let raw = RawSample::from_registers(&BURST).unwrap();
    let calib = reference_calibration();
    assert_eq!(compensate(&raw, &calib), compensate(&raw, &calib));
}

//==================================================================================ENGINE
/// Serves the three calibration blocks and counts reads.
struct CalibrationRegisters {
    registers: [u8; 256],
    reads: usize,
    fail: bool,
}

impl CalibrationRegisters {
    fn new() -> Self {
        let mut registers = [0u8; 256];
        registers[0x88..0x88 + 24].copy_from_slice(&TEMP_PRESS_BLOCK);
        registers[0xA1] = H1_BLOCK[0];
        registers[0xE1..0xE1 + 7].copy_from_slice(&HUMIDITY_BLOCK);
        Self {
            registers,
            reads: 0,
            fail: false,
        }
    }
}

impl Transport for CalibrationRegisters {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        if self.fail {
            return TransactionResult::failed();
        }
        let mut pointer = 0usize;
        let mut moved = 0;
        for phase in phases.iter_mut() {
            match phase {
                Phase::Write(bytes) => {
                    pointer = bytes[0] as usize;
                    moved += bytes.len();
                }
                Phase::Read(buffer) => {
                    self.reads += 1;
                    buffer.copy_from_slice(&self.registers[pointer..pointer + buffer.len()]);
                    moved += buffer.len();
                }
            }
        }
        TransactionResult::completed(moved)
    }
}

#[test]
/// Compensation before calibration is refused.
fn test_engine_not_calibrated() {
    let engine = CompensationEngine::new();
    let raw = RawSample::from_registers(&BURST).unwrap();
    assert_eq!(engine.compensate(&raw), Err(CompensationError::NotCalibrated));
    assert!(!engine.is_calibrated());
}

#[test]
/// Loading issues exactly three reads and happens once.
fn test_engine_load_once() {
    let mut bus = RegisterBus::new(CalibrationRegisters::new());
    let mut engine = CompensationEngine::new();

    let table = *engine.load_calibration(&mut bus).unwrap();
    assert_eq!(table, reference_calibration());
    assert_eq!(bus.transport().reads, 3);

    assert_eq!(
        engine.load_calibration(&mut bus),
        Err(CompensationError::AlreadyCalibrated)
    );
    assert_eq!(bus.transport().reads, 3);

    let raw = RawSample::from_registers(&BURST).unwrap();
    assert_eq!(engine.compensate(&raw).unwrap().temperature_celsius, 25.08);
}

#[test]
/// Bus failures while loading propagate and leave the engine uncalibrated.
fn test_engine_load_bus_failure() {
    let mut registers = CalibrationRegisters::new();
    registers.fail = true;
    let mut bus = RegisterBus::new(registers);
    let mut engine = CompensationEngine::new();

    assert!(matches!(
        engine.load_calibration(&mut bus),
        Err(CompensationError::Bus(BusError::TransactionExceeded { .. }))
    ));
    assert!(!engine.is_calibrated());
}

#[test]
/// An engine seeded with a table compensates immediately.
fn test_engine_with_calibration() {
    let engine = CompensationEngine::with_calibration(reference_calibration());
    let raw = RawSample::from_registers(&BURST[..6]).unwrap();
    let reading = engine.compensate(&raw).unwrap();
    assert_eq!(reading.humidity_percent, None);
    assert_eq!(reading.temperature_celsius, 25.08);
}
