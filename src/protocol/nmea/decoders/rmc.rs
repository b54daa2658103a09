//! RMC: recommended minimum specific GNSS data.
//!
//! ```text
//! $GPRMC,hhmmss.ss,A,llll.ll,a,yyyyy.yy,a,x.x,x.x,ddmmyy,x.x,a*hh
//!        1         2 3       4 5        6 7   8   9      10  11
//! ```
use crate::error::FieldDecodeError;
use crate::protocol::nmea::decoders::SentenceDecoder;
use crate::protocol::nmea::event::{NavigationEvent, PositionCourseTime};
use crate::protocol::nmea::fields::{
    parse_coordinate, parse_date, parse_optional, parse_time_of_day, Axis, Hemisphere,
};
use crate::protocol::nmea::sentence::NmeaSentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RmcDecoder {
    prefix: &'static str,
}

impl RmcDecoder {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

impl Default for RmcDecoder {
    fn default() -> Self {
        Self::new("$GPRMC")
    }
}

impl SentenceDecoder for RmcDecoder {
    fn prefix(&self) -> &str {
        self.prefix
    }

    /// Emits nothing for void (`V`) status.
    fn process(
        &self,
        sentence: &NmeaSentence<'_>,
    ) -> Result<Option<NavigationEvent>, FieldDecodeError> {
        match sentence.required(2)? {
            "A" => {}
            "V" => return Ok(None),
            _ => return Err(FieldDecodeError::OutOfRange { field: "status" }),
        }

        let data = PositionCourseTime {
            time: parse_time_of_day(sentence.required(1)?)?,
            date: parse_date(sentence.required(9)?)?,
            latitude: parse_coordinate(sentence.required(3)?, sentence.required(4)?, Axis::Latitude)?,
            longitude: parse_coordinate(
                sentence.required(5)?,
                sentence.required(6)?,
                Axis::Longitude,
            )?,
            speed_knots: parse_optional(sentence.field(7), "speed")?,
            course_deg: parse_optional(sentence.field(8), "course")?,
            magnetic_variation_deg: magnetic_variation(sentence)?,
        };

        Ok(Some(NavigationEvent::PositionCourseTime(data)))
    }
}

/// Signed variation: the direction letter is mandatory once a value is given.
fn magnetic_variation(sentence: &NmeaSentence<'_>) -> Result<Option<f32>, FieldDecodeError> {
    let Some(value) = parse_optional::<f32>(sentence.field(10), "magnetic variation")? else {
        return Ok(None);
    };
    match Hemisphere::from_field(sentence.required(11)?)? {
        Hemisphere::East => Ok(Some(value)),
        Hemisphere::West => Ok(Some(-value)),
        Hemisphere::North | Hemisphere::South => Err(FieldDecodeError::UnexpectedHemisphere),
    }
}
