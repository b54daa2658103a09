//! Measurement configuration and its encoding into ctrl_hum, ctrl_meas and config.

/// Oversampling ratio of one measurement channel (`osrs_x` fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Oversampling {
    /// Channel disabled; its output stays at the reset value.
    Skipped = 0b000,
    X1 = 0b001,
    X2 = 0b010,
    X4 = 0b011,
    X8 = 0b100,
    X16 = 0b101,
}

impl Oversampling {
    /// Number of samples averaged per measurement (0 when skipped).
    pub const fn factor(self) -> u32 {
        match self {
            Self::Skipped => 0,
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// IIR filter coefficient (`config.filter`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Filter {
    Off = 0b000,
    X2 = 0b001,
    X4 = 0b010,
    X8 = 0b011,
    X16 = 0b100,
}

/// Inactive period between normal-mode measurements (`config.t_sb`, BME280 values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Standby {
    Ms0_5 = 0b000,
    Ms62_5 = 0b001,
    Ms125 = 0b010,
    Ms250 = 0b011,
    Ms500 = 0b100,
    Ms1000 = 0b101,
    Ms10 = 0b110,
    Ms20 = 0b111,
}

/// Power mode (`ctrl_meas.mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SensorMode {
    Sleep = 0b00,
    /// One measurement per ctrl_meas write, then back to sleep.
    Forced = 0b01,
    /// Continuous cycling with the configured standby time.
    Normal = 0b11,
}

/// Device configuration. The default is the datasheet's weather-monitoring
/// profile: forced mode, x1 on every channel, filter off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bme280Config {
    pub temperature: Oversampling,
    pub pressure: Oversampling,
    /// Ignored by BMP280 parts.
    pub humidity: Oversampling,
    pub filter: Filter,
    pub standby: Standby,
    pub mode: SensorMode,
}

impl Default for Bme280Config {
    fn default() -> Self {
        Self {
            temperature: Oversampling::X1,
            pressure: Oversampling::X1,
            humidity: Oversampling::X1,
            filter: Filter::Off,
            standby: Standby::Ms1000,
            mode: SensorMode::Forced,
        }
    }
}

impl Bme280Config {
    /// `ctrl_hum` (0xF2): `osrs_h` in bits 2..0.
    pub const fn ctrl_hum(&self) -> u8 {
        self.humidity as u8
    }

    /// `ctrl_meas` (0xF4): `osrs_t[7:5] | osrs_p[4:2] | mode[1:0]`.
    pub const fn ctrl_meas(&self) -> u8 {
        ((self.temperature as u8) << 5) | ((self.pressure as u8) << 2) | self.mode as u8
    }

    /// `ctrl_meas` with the mode bits forced to sleep.
    pub const fn ctrl_meas_sleep(&self) -> u8 {
        self.ctrl_meas() & !0b11
    }

    /// `config` (0xF5): `t_sb[7:5] | filter[4:2]`, 3-wire SPI disabled.
    pub const fn config(&self) -> u8 {
        ((self.standby as u8) << 5) | ((self.filter as u8) << 2)
    }

    /// Worst-case conversion time in microseconds (datasheet appendix B).
    pub const fn max_measurement_time_us(&self, with_humidity: bool) -> u32 {
        let mut time = 1_250 + 2_300 * self.temperature.factor();
        if self.pressure.factor() > 0 {
            time += 2_300 * self.pressure.factor() + 575;
        }
        if with_humidity && self.humidity.factor() > 0 {
            time += 2_300 * self.humidity.factor() + 575;
        }
        time
    }
}
