//! Driver tests against a simulated register map.
use super::*;
use crate::core::{Phase, TransactionResult};
use crate::error::BusError;
use std::vec::Vec;

const TEMP_PRESS_BLOCK: [u8; 24] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C,
    0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
];
const HUMIDITY_BLOCK: [u8; 7] = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];
const BURST: [u8; 8] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x30];

/// Register map with busy status bits that clear after a number of polls.
struct SimulatedChip {
    registers: [u8; 256],
    nvm_busy_polls: usize,
    conversion_busy_polls: usize,
    busy_left: usize,
    busy_mask: u8,
    /// Writes to this register fail at the transport.
    failing_register: Option<u8>,
    writes: Vec<(u8, u8)>,
}

impl SimulatedChip {
    fn new(chip_id: u8) -> Self {
        let mut registers = [0u8; 256];
        registers[REG_CHIP_ID as usize] = chip_id;
        registers[0x88..0x88 + 24].copy_from_slice(&TEMP_PRESS_BLOCK);
        registers[0xA1] = 75;
        registers[0xE1..0xE1 + 7].copy_from_slice(&HUMIDITY_BLOCK);
        registers[REG_DATA as usize..REG_DATA as usize + 8].copy_from_slice(&BURST);
        Self {
            registers,
            nvm_busy_polls: 2,
            conversion_busy_polls: 1,
            busy_left: 0,
            busy_mask: 0,
            failing_register: None,
            writes: Vec::new(),
        }
    }

    fn on_write(&mut self, register: u8, value: u8) {
        self.writes.push((register, value));
        self.registers[register as usize] = value;
        match (register, value) {
            (REG_RESET, RESET_COMMAND) => {
                self.busy_mask = STATUS_IM_UPDATE;
                self.busy_left = self.nvm_busy_polls;
            }
            (REG_CTRL_MEAS, value) if value & 0b11 == SensorMode::Forced as u8 => {
                self.busy_mask = STATUS_MEASURING;
                self.busy_left = self.conversion_busy_polls;
            }
            _ => {}
        }
    }

    fn status(&mut self) -> u8 {
        if self.busy_left > 0 {
            self.busy_left -= 1;
            self.busy_mask
        } else {
            0
        }
    }
}

impl Transport for SimulatedChip {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        if let (Some(failing), [Phase::Write([register, _])]) = (self.failing_register, &*phases) {
            if *register == failing {
                return TransactionResult::failed();
            }
        }
        let mut pointer = 0usize;
        let mut moved = 0;
        for phase in phases.iter_mut() {
            match phase {
                Phase::Write(bytes) => {
                    pointer = bytes[0] as usize;
                    if let &[register, value] = *bytes {
                        self.on_write(register, value);
                    }
                    moved += bytes.len();
                }
                Phase::Read(buffer) => {
                    if pointer == REG_STATUS as usize {
                        buffer[0] = self.status();
                    } else {
                        buffer.copy_from_slice(&self.registers[pointer..pointer + buffer.len()]);
                    }
                    moved += buffer.len();
                }
            }
        }
        TransactionResult::completed(moved)
    }
}

/// Delay that only accumulates the requested time.
#[derive(Default)]
struct RecordingDelay {
    total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

//==================================================================================INIT
#[test]
/// BME280 bring-up: identify, reset, calibrate, configure in order.
fn test_init_bme280() {
    let mut sensor = Bme280::new(SimulatedChip::new(CHIP_ID_BME280), Bme280Config::default());
    let mut delay = RecordingDelay::default();

    assert_eq!(sensor.init(&mut delay), Ok(ChipVariant::Bme280));
    assert_eq!(sensor.chip(), Some(ChipVariant::Bme280));
    assert_eq!(sensor.calibration().unwrap().dig_t1, 27504);
    assert_eq!(sensor.calibration().unwrap().dig_h4, 313);

    let config = Bme280Config::default();
    let chip = sensor.release();
    assert_eq!(
        chip.writes,
        vec![
            (REG_RESET, RESET_COMMAND),
            (REG_CTRL_MEAS, config.ctrl_meas_sleep()),
            (REG_CTRL_HUM, config.ctrl_hum()),
            (REG_CONFIG, config.config()),
        ]
    );
    // Reset delay plus one poll sleep per busy status read.
    assert_eq!(delay.total_ns, 4_000_000);
}

#[test]
/// BMP280 parts skip ctrl_hum and read a 6-byte burst.
fn test_init_bmp280() {
    let mut sensor = Bme280::new(SimulatedChip::new(CHIP_ID_BMP280), Bme280Config::default());
    let mut delay = RecordingDelay::default();

    assert_eq!(sensor.init(&mut delay), Ok(ChipVariant::Bmp280));
    let reading = sensor.measure(&mut delay).unwrap();
    assert_eq!(reading.humidity_percent, None);
    assert_eq!(reading.temperature_celsius, 25.08);

    let chip = sensor.release();
    assert!(chip.writes.iter().all(|(register, _)| *register != REG_CTRL_HUM));
}

#[test]
/// Unknown chip ids stop the bring-up before any write.
fn test_unsupported_chip() {
    let mut sensor = Bme280::new(SimulatedChip::new(0x55), Bme280Config::default());
    let mut delay = RecordingDelay::default();

    assert_eq!(
        sensor.init(&mut delay),
        Err(SensorError::UnsupportedChip { id: 0x55 })
    );
    assert!(sensor.release().writes.is_empty());
}

#[test]
/// A stuck NVM copy is reported after the poll ceiling.
fn test_nvm_copy_timeout() {
    let mut chip = SimulatedChip::new(CHIP_ID_BME280);
    chip.nvm_busy_polls = usize::MAX;
    let mut sensor = Bme280::new(chip, Bme280Config::default());
    let mut delay = RecordingDelay::default();

    assert_eq!(sensor.init(&mut delay), Err(SensorError::NvmCopyTimeout));
    assert_eq!(sensor.chip(), None);
}

#[test]
/// A second bring-up resets the part and configures it again.
fn test_init_twice() {
    let mut sensor = Bme280::new(SimulatedChip::new(CHIP_ID_BME280), Bme280Config::default());
    let mut delay = RecordingDelay::default();
    sensor.init(&mut delay).unwrap();
    sensor.bus_mut().transport_mut().writes.clear();

    assert_eq!(sensor.init(&mut delay), Ok(ChipVariant::Bme280));
    let config = Bme280Config::default();
    assert_eq!(
        sensor.bus_mut().transport_mut().writes,
        vec![
            (REG_RESET, RESET_COMMAND),
            (REG_CTRL_MEAS, config.ctrl_meas_sleep()),
            (REG_CTRL_HUM, config.ctrl_hum()),
            (REG_CONFIG, config.config()),
        ]
    );
    assert_eq!(sensor.measure(&mut delay).unwrap().temperature_celsius, 25.08);
}

#[test]
/// A bring-up that fails while configuring can be retried once the bus recovers.
fn test_init_retry_after_config_failure() {
    let mut chip = SimulatedChip::new(CHIP_ID_BME280);
    chip.failing_register = Some(REG_CONFIG);
    let mut sensor = Bme280::new(chip, Bme280Config::default());
    let mut delay = RecordingDelay::default();

    assert!(matches!(
        sensor.init(&mut delay),
        Err(SensorError::Bus(BusError::TransactionExceeded {
            address: Some(REG_CONFIG),
            ..
        }))
    ));
    assert_eq!(sensor.chip(), None);
    assert!(sensor.calibration().is_none());

    sensor.bus_mut().transport_mut().failing_register = None;
    assert_eq!(sensor.init(&mut delay), Ok(ChipVariant::Bme280));
    assert_eq!(sensor.measure(&mut delay).unwrap().temperature_celsius, 25.08);
}

//==================================================================================MEASURE
#[test]
/// Forced measurement: trigger, wait, read, compensate.
fn test_measure_forced() {
    let mut sensor = Bme280::new(SimulatedChip::new(CHIP_ID_BME280), Bme280Config::default());
    let mut delay = RecordingDelay::default();
    sensor.init(&mut delay).unwrap();
    delay.total_ns = 0;

    let reading = sensor.measure(&mut delay).unwrap();
    assert_eq!(reading.temperature_celsius, 25.08);
    assert_eq!(reading.pressure_pascals, 100653.25390625);
    assert_eq!(reading.humidity_percent, Some(56317.0 / 1024.0));

    // Worst-case conversion time plus one busy poll.
    assert_eq!(delay.total_ns, 9_300_000 + 1_000_000);
    let chip = sensor.release();
    assert_eq!(
        chip.writes.last(),
        Some(&(REG_CTRL_MEAS, Bme280Config::default().ctrl_meas()))
    );
}

#[test]
/// A conversion that never completes times out.
fn test_conversion_timeout() {
    let mut chip = SimulatedChip::new(CHIP_ID_BME280);
    chip.conversion_busy_polls = usize::MAX;
    let mut sensor = Bme280::new(chip, Bme280Config::default());
    let mut delay = RecordingDelay::default();
    sensor.init(&mut delay).unwrap();

    assert_eq!(sensor.measure(&mut delay), Err(SensorError::ConversionTimeout));
}

#[test]
/// Measuring before bring-up is refused without touching the bus.
fn test_measure_before_init() {
    let mut sensor = Bme280::new(SimulatedChip::new(CHIP_ID_BME280), Bme280Config::default());
    let mut delay = RecordingDelay::default();

    assert_eq!(
        sensor.measure(&mut delay),
        Err(SensorError::Compensation(CompensationError::NotCalibrated))
    );
    assert_eq!(
        sensor.read_raw(),
        Err(SensorError::Compensation(CompensationError::NotCalibrated))
    );
    assert!(sensor.release().writes.is_empty());
}

#[test]
/// Normal mode writes the running ctrl_meas last and reads without triggering.
fn test_normal_mode() {
    let config = Bme280Config {
        mode: SensorMode::Normal,
        ..Bme280Config::default()
    };
    let mut sensor = Bme280::new(SimulatedChip::new(CHIP_ID_BME280), config);
    let mut delay = RecordingDelay::default();
    sensor.init(&mut delay).unwrap();
    delay.total_ns = 0;

    let raw = sensor.read_raw().unwrap();
    assert_eq!(raw.adc_humidity, Some(30000));
    sensor.measure(&mut delay).unwrap();
    assert_eq!(delay.total_ns, 0);

    let chip = sensor.release();
    assert_eq!(chip.writes.last(), Some(&(REG_CTRL_MEAS, config.ctrl_meas())));
}

#[test]
/// Bus failures surface as sensor errors.
fn test_bus_failure_propagates() {
    struct DeadBus;
    impl Transport for DeadBus {
        fn execute(&mut self, _phases: &mut [Phase<'_>]) -> TransactionResult {
            TransactionResult::failed()
        }
    }

    let mut sensor = Bme280::new(DeadBus, Bme280Config::default());
    let mut delay = RecordingDelay::default();
    assert!(matches!(
        sensor.init(&mut delay),
        Err(SensorError::Bus(BusError::TransactionExceeded { .. }))
    ));
}

#[test]
/// Sleep mode never converts: measuring is refused without touching the bus.
fn test_measure_in_sleep_mode() {
    let config = Bme280Config {
        mode: SensorMode::Sleep,
        ..Bme280Config::default()
    };
    let mut sensor = Bme280::new(SimulatedChip::new(CHIP_ID_BME280), config);
    let mut delay = RecordingDelay::default();
    sensor.init(&mut delay).unwrap();
    let writes = sensor.bus_mut().transport_mut().writes.len();

    assert_eq!(sensor.measure(&mut delay), Err(SensorError::Asleep));
    assert_eq!(sensor.bus_mut().transport_mut().writes.len(), writes);
    assert!(sensor.read_raw().is_ok());
}
