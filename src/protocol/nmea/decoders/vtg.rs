//! VTG: course over ground and ground speed. Every value is optional.
//!
//! ```text
//! $GPVTG,x.x,T,x.x,M,x.x,N,x.x,K*hh
//!        1   2 3   4 5   6 7   8
//! ```
use crate::error::FieldDecodeError;
use crate::protocol::nmea::decoders::SentenceDecoder;
use crate::protocol::nmea::event::{CourseOverGround, NavigationEvent};
use crate::protocol::nmea::fields::parse_optional;
use crate::protocol::nmea::sentence::NmeaSentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VtgDecoder {
    prefix: &'static str,
}

impl VtgDecoder {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

impl Default for VtgDecoder {
    fn default() -> Self {
        Self::new("$GPVTG")
    }
}

impl SentenceDecoder for VtgDecoder {
    fn prefix(&self) -> &str {
        self.prefix
    }

    fn process(
        &self,
        sentence: &NmeaSentence<'_>,
    ) -> Result<Option<NavigationEvent>, FieldDecodeError> {
        Ok(Some(NavigationEvent::CourseOverGround(CourseOverGround {
            true_course_deg: parse_optional(sentence.field(1), "true course")?,
            magnetic_course_deg: parse_optional(sentence.field(3), "magnetic course")?,
            speed_knots: parse_optional(sentence.field(5), "speed knots")?,
            speed_kmh: parse_optional(sentence.field(7), "speed km/h")?,
        })))
    }
}
