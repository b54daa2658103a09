//! Field-level parsers shared by the sentence decoders: UTC time, date,
//! `ddmm.mmmm` coordinates with their hemisphere letter, and numeric fields.
//!
//! Every parser works on a single non-empty field; absence is the caller's
//! concern ([`NmeaSentence::required`](super::sentence::NmeaSentence::required)
//! vs [`optional`](super::sentence::NmeaSentence::optional)).
use core::str::FromStr;

use crate::error::FieldDecodeError;

//==================================================================================TIME
/// UTC time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    /// 0..=60 (leap second allowed).
    pub second: u8,
    pub millisecond: u16,
}

impl TimeOfDay {
    /// Seconds elapsed since midnight, fraction included.
    pub fn seconds_since_midnight(&self) -> f64 {
        self.hour as f64 * 3600.0
            + self.minute as f64 * 60.0
            + self.second as f64
            + self.millisecond as f64 / 1000.0
    }
}

/// Parse `hhmmss` with an optional fractional part (`.s`, `.ss`, `.sss`, extra
/// digits are truncated).
pub fn parse_time_of_day(field: &str) -> Result<TimeOfDay, FieldDecodeError> {
    let (whole, fraction) = match field.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (field, None),
    };
    if whole.len() != 6 {
        return Err(FieldDecodeError::InvalidTime);
    }

    let digits = whole.as_bytes();
    let hour = two_digits(&digits[0..2]).ok_or(FieldDecodeError::InvalidTime)?;
    let minute = two_digits(&digits[2..4]).ok_or(FieldDecodeError::InvalidTime)?;
    let second = two_digits(&digits[4..6]).ok_or(FieldDecodeError::InvalidTime)?;
    if hour > 23 || minute > 59 || second > 60 {
        return Err(FieldDecodeError::InvalidTime);
    }

    let millisecond = match fraction {
        Some(digits) => parse_millis(digits).ok_or(FieldDecodeError::InvalidTime)?,
        None => 0,
    };

    Ok(TimeOfDay {
        hour,
        minute,
        second,
        millisecond,
    })
}

fn parse_millis(digits: &str) -> Option<u16> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut millis = 0u16;
    let mut scale = 100u16;
    for byte in digits.bytes().take(3) {
        millis += (byte - b'0') as u16 * scale;
        scale /= 10;
    }
    Some(millis)
}

//==================================================================================DATE
/// Calendar date carried by RMC sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub day: u8,
    pub month: u8,
    /// Four-digit year.
    pub year: u16,
}

/// Two-digit years from this value up map to 19xx, below it to 20xx.
pub const CENTURY_PIVOT: u8 = 80;

/// Parse `ddmmyy`.
pub fn parse_date(field: &str) -> Result<Date, FieldDecodeError> {
    if field.len() != 6 {
        return Err(FieldDecodeError::InvalidDate);
    }
    let digits = field.as_bytes();
    let day = two_digits(&digits[0..2]).ok_or(FieldDecodeError::InvalidDate)?;
    let month = two_digits(&digits[2..4]).ok_or(FieldDecodeError::InvalidDate)?;
    let yy = two_digits(&digits[4..6]).ok_or(FieldDecodeError::InvalidDate)?;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(FieldDecodeError::InvalidDate);
    }
    let year = if yy >= CENTURY_PIVOT {
        1900 + yy as u16
    } else {
        2000 + yy as u16
    };
    Ok(Date { day, month, year })
}

fn two_digits(digits: &[u8]) -> Option<u8> {
    match digits {
        [tens @ b'0'..=b'9', units @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (units - b'0')),
        _ => None,
    }
}

//==================================================================================COORDINATE
/// Hemisphere letter following a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse the single-letter direction field.
    pub fn from_field(field: &str) -> Result<Self, FieldDecodeError> {
        let mut chars = field.chars();
        let letter = chars.next().ok_or(FieldDecodeError::InvalidDirection { letter: ' ' })?;
        if chars.next().is_some() {
            return Err(FieldDecodeError::InvalidDirection { letter });
        }
        match letter {
            'N' => Ok(Self::North),
            'S' => Ok(Self::South),
            'E' => Ok(Self::East),
            'W' => Ok(Self::West),
            _ => Err(FieldDecodeError::InvalidDirection { letter }),
        }
    }

    /// `-1.0` for southern and western hemispheres, `1.0` otherwise.
    pub fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }

    fn axis(self) -> Axis {
        match self {
            Self::North | Self::South => Axis::Latitude,
            Self::East | Self::West => Axis::Longitude,
        }
    }
}

/// Coordinate axis, selecting the allowed hemispheres and degree range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `ddmm.mmmm`, N/S, at most 90°.
    Latitude,
    /// `dddmm.mmmm`, E/W, at most 180°.
    Longitude,
}

impl Axis {
    fn max_degrees(self) -> u16 {
        match self {
            Self::Latitude => 90,
            Self::Longitude => 180,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

/// Coordinate as transmitted: whole degrees plus decimal minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    pub degrees: u16,
    pub minutes: f64,
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    /// Signed decimal degrees (south and west negative).
    pub fn decimal_degrees(&self) -> f64 {
        self.hemisphere.sign() * (self.degrees as f64 + self.minutes / 60.0)
    }
}

/// Parse a `ddmm.mmmm` value with its hemisphere letter for the given axis.
///
/// Degrees are the integer part of `value / 100`, minutes the remainder.
pub fn parse_coordinate(
    value: &str,
    hemisphere: &str,
    axis: Axis,
) -> Result<Coordinate, FieldDecodeError> {
    let raw: f64 = parse_number(value, axis.name())?;
    let hemisphere = Hemisphere::from_field(hemisphere)?;
    if hemisphere.axis() != axis {
        return Err(FieldDecodeError::UnexpectedHemisphere);
    }
    if !raw.is_finite() || raw < 0.0 {
        return Err(FieldDecodeError::OutOfRange { field: axis.name() });
    }

    // Non-negative, so the cast truncates toward the floor.
    let degrees = (raw / 100.0) as u32;
    let minutes = raw - degrees as f64 * 100.0;
    let max = axis.max_degrees() as u32;
    if minutes >= 60.0 || degrees > max || (degrees == max && minutes > 0.0) {
        return Err(FieldDecodeError::OutOfRange { field: axis.name() });
    }

    Ok(Coordinate {
        degrees: degrees as u16,
        minutes,
        hemisphere,
    })
}

//==================================================================================NUMBERS
/// Parse a non-empty numeric field.
pub fn parse_number<T: FromStr>(field: &str, name: &'static str) -> Result<T, FieldDecodeError> {
    field
        .parse()
        .map_err(|_| FieldDecodeError::InvalidNumber { field: name })
}

/// Parse an optional numeric field: absent or empty yields `None`.
pub fn parse_optional<T: FromStr>(
    field: Option<&str>,
    name: &'static str,
) -> Result<Option<T>, FieldDecodeError> {
    match field {
        Some(text) if !text.is_empty() => parse_number(text, name).map(Some),
        _ => Ok(None),
    }
}
