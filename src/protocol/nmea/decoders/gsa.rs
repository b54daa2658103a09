//! GSA: DOP and active satellites.
//!
//! ```text
//! $GPGSA,a,x,p1,p2,...,p12,p.p,h.h,v.v*hh
//!        1 2 3  4      14  15  16  17
//! ```
use heapless::Vec;

use crate::error::FieldDecodeError;
use crate::protocol::nmea::decoders::SentenceDecoder;
use crate::protocol::nmea::event::{
    ActiveSatellites, FixType, NavigationEvent, SelectionMode, MAX_ACTIVE_SATELLITES,
};
use crate::protocol::nmea::fields::{parse_number, parse_optional};
use crate::protocol::nmea::sentence::NmeaSentence;

const FIRST_PRN_FIELD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GsaDecoder {
    prefix: &'static str,
}

impl GsaDecoder {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

impl Default for GsaDecoder {
    fn default() -> Self {
        Self::new("$GPGSA")
    }
}

impl SentenceDecoder for GsaDecoder {
    fn prefix(&self) -> &str {
        self.prefix
    }

    fn process(
        &self,
        sentence: &NmeaSentence<'_>,
    ) -> Result<Option<NavigationEvent>, FieldDecodeError> {
        let selection = match sentence.required(1)? {
            "A" => SelectionMode::Automatic,
            "M" => SelectionMode::Manual,
            _ => return Err(FieldDecodeError::OutOfRange { field: "selection mode" }),
        };
        let fix_type = match parse_number::<u8>(sentence.required(2)?, "fix type")? {
            1 => FixType::NoFix,
            2 => FixType::Fix2D,
            3 => FixType::Fix3D,
            _ => return Err(FieldDecodeError::OutOfRange { field: "fix type" }),
        };

        let mut prns = Vec::new();
        for index in FIRST_PRN_FIELD..FIRST_PRN_FIELD + MAX_ACTIVE_SATELLITES {
            if let Some(prn) = parse_optional::<u8>(sentence.field(index), "prn")? {
                // At most MAX_ACTIVE_SATELLITES slots are visited.
                let _ = prns.push(prn);
            }
        }

        let dop_field = FIRST_PRN_FIELD + MAX_ACTIVE_SATELLITES;
        Ok(Some(NavigationEvent::ActiveSatellites(ActiveSatellites {
            selection,
            fix_type,
            prns,
            pdop: parse_optional(sentence.field(dop_field), "pdop")?,
            hdop: parse_optional(sentence.field(dop_field + 1), "hdop")?,
            vdop: parse_optional(sentence.field(dop_field + 2), "vdop")?,
        })))
    }
}
