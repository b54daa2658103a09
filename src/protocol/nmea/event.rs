//! Typed navigation events produced by the sentence decoders.
use heapless::Vec;

use crate::protocol::nmea::fields::{Coordinate, Date, TimeOfDay};

/// Satellite slots reported by one GSA sentence.
pub const MAX_ACTIVE_SATELLITES: usize = 12;

/// One decoded sentence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    /// GGA: time, position and fix quality.
    PositionFix(PositionFix),
    /// GSA: satellites used in the solution and dilution of precision.
    ActiveSatellites(ActiveSatellites),
    /// RMC: recommended minimum position, course and time.
    PositionCourseTime(PositionCourseTime),
    /// VTG: course and speed over ground.
    CourseOverGround(CourseOverGround),
}

//==================================================================================GGA
/// GGA fix indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    Invalid,
    Gps,
    Differential,
    Pps,
    RealTimeKinematic,
    FloatRtk,
    Estimated,
    Manual,
    Simulation,
}

impl FixQuality {
    /// Decode the GGA quality digit.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Invalid,
            1 => Self::Gps,
            2 => Self::Differential,
            3 => Self::Pps,
            4 => Self::RealTimeKinematic,
            5 => Self::FloatRtk,
            6 => Self::Estimated,
            7 => Self::Manual,
            8 => Self::Simulation,
            _ => return None,
        })
    }

    /// Whether the receiver reports a usable position.
    pub fn has_fix(self) -> bool {
        self != Self::Invalid
    }
}

/// Position fix (GGA).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionFix {
    pub time: TimeOfDay,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub quality: FixQuality,
    pub satellites_used: u8,
    pub hdop: Option<f32>,
    /// Antenna altitude above mean sea level, meters.
    pub altitude_m: Option<f32>,
    /// Geoid height above the WGS84 ellipsoid, meters.
    pub geoid_separation_m: Option<f32>,
    /// Seconds since the last differential update.
    pub dgps_age_s: Option<f32>,
    pub dgps_station: Option<u16>,
}

//==================================================================================GSA
/// GSA 2D/3D switching mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectionMode {
    Automatic,
    Manual,
}

/// GSA fix type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixType {
    NoFix,
    Fix2D,
    Fix3D,
}

/// Active satellites and dilution of precision (GSA).
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSatellites {
    pub selection: SelectionMode,
    pub fix_type: FixType,
    /// PRNs of the satellites used, in slot order, empty slots skipped.
    pub prns: Vec<u8, MAX_ACTIVE_SATELLITES>,
    pub pdop: Option<f32>,
    pub hdop: Option<f32>,
    pub vdop: Option<f32>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ActiveSatellites {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ActiveSatellites {{ selection: {}, fix_type: {}, prns: {=[u8]}, pdop: {}, hdop: {}, vdop: {} }}",
            self.selection,
            self.fix_type,
            &self.prns[..],
            self.pdop,
            self.hdop,
            self.vdop
        )
    }
}

//==================================================================================RMC
/// Recommended minimum data (RMC). Only emitted for valid (`A`) status.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionCourseTime {
    pub time: TimeOfDay,
    pub date: Date,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub speed_knots: Option<f32>,
    /// True course, degrees.
    pub course_deg: Option<f32>,
    /// Magnetic variation, degrees; east positive, west negative.
    pub magnetic_variation_deg: Option<f32>,
}

//==================================================================================VTG
/// Course and speed over ground (VTG).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CourseOverGround {
    pub true_course_deg: Option<f32>,
    pub magnetic_course_deg: Option<f32>,
    pub speed_knots: Option<f32>,
    pub speed_kmh: Option<f32>,
}
