//! GGA: global positioning system fix data.
//!
//! ```text
//! $GPGGA,hhmmss.ss,llll.ll,a,yyyyy.yy,a,q,nn,h.h,a.a,M,g.g,M,d.d,xxxx*hh
//!        1         2       3 4        5 6 7  8   9   10 11 12 13  14
//! ```
use crate::error::FieldDecodeError;
use crate::protocol::nmea::decoders::SentenceDecoder;
use crate::protocol::nmea::event::{FixQuality, NavigationEvent, PositionFix};
use crate::protocol::nmea::fields::{
    parse_coordinate, parse_number, parse_optional, parse_time_of_day, Axis,
};
use crate::protocol::nmea::sentence::NmeaSentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GgaDecoder {
    prefix: &'static str,
}

impl GgaDecoder {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

impl Default for GgaDecoder {
    fn default() -> Self {
        Self::new("$GPGGA")
    }
}

impl SentenceDecoder for GgaDecoder {
    fn prefix(&self) -> &str {
        self.prefix
    }

    /// Emits nothing while the receiver reports fix quality 0.
    fn process(
        &self,
        sentence: &NmeaSentence<'_>,
    ) -> Result<Option<NavigationEvent>, FieldDecodeError> {
        let code: u8 = parse_number(sentence.required(6)?, "fix quality")?;
        let quality =
            FixQuality::from_code(code).ok_or(FieldDecodeError::OutOfRange { field: "fix quality" })?;
        if !quality.has_fix() {
            return Ok(None);
        }

        let fix = PositionFix {
            time: parse_time_of_day(sentence.required(1)?)?,
            latitude: parse_coordinate(sentence.required(2)?, sentence.required(3)?, Axis::Latitude)?,
            longitude: parse_coordinate(
                sentence.required(4)?,
                sentence.required(5)?,
                Axis::Longitude,
            )?,
            quality,
            satellites_used: parse_number(sentence.required(7)?, "satellites used")?,
            hdop: parse_optional(sentence.field(8), "hdop")?,
            altitude_m: parse_optional(sentence.field(9), "altitude")?,
            geoid_separation_m: parse_optional(sentence.field(11), "geoid separation")?,
            dgps_age_s: parse_optional(sentence.field(13), "dgps age")?,
            dgps_station: parse_optional(sentence.field(14), "dgps station")?,
        };

        Ok(Some(NavigationEvent::PositionFix(fix)))
    }
}
