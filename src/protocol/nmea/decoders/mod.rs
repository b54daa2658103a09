//! Sentence decoders: one per prefix, each turning validated fields into an
//! optional [`NavigationEvent`].
//!
//! A decoder may decline to emit (GGA without fix, RMC with void status); a
//! field error only affects the sentence being decoded.
use crate::error::FieldDecodeError;
use crate::protocol::nmea::event::NavigationEvent;
use crate::protocol::nmea::sentence::NmeaSentence;

pub mod gga;
pub mod gsa;
pub mod rmc;
pub mod vtg;

pub use gga::GgaDecoder;
pub use gsa::GsaDecoder;
pub use rmc::RmcDecoder;
pub use vtg::VtgDecoder;

/// Contract of a prefix-keyed sentence decoder.
pub trait SentenceDecoder {
    /// Prefix handled by this decoder, `$` included (e.g. `$GPGGA`).
    fn prefix(&self) -> &str;

    /// Decode the fields of a sentence whose prefix matched.
    fn process(
        &self,
        sentence: &NmeaSentence<'_>,
    ) -> Result<Option<NavigationEvent>, FieldDecodeError>;
}

/// Talker identifiers with a standard decoder set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Talker {
    /// `GP`
    Gps,
    /// `GL`
    Glonass,
    /// `GA`
    Galileo,
    /// `GB`
    BeiDou,
    /// `GN`, multi-constellation solution.
    Combined,
}

impl Talker {
    /// GGA, GSA, RMC and VTG prefixes of this talker.
    const fn prefixes(self) -> [&'static str; 4] {
        match self {
            Self::Gps => ["$GPGGA", "$GPGSA", "$GPRMC", "$GPVTG"],
            Self::Glonass => ["$GLGGA", "$GLGSA", "$GLRMC", "$GLVTG"],
            Self::Galileo => ["$GAGGA", "$GAGSA", "$GARMC", "$GAVTG"],
            Self::BeiDou => ["$GBGGA", "$GBGSA", "$GBRMC", "$GBVTG"],
            Self::Combined => ["$GNGGA", "$GNGSA", "$GNRMC", "$GNVTG"],
        }
    }
}

/// The four standard decoders of one talker, ready to be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardDecoders {
    pub gga: GgaDecoder,
    pub gsa: GsaDecoder,
    pub rmc: RmcDecoder,
    pub vtg: VtgDecoder,
}

impl StandardDecoders {
    pub const fn for_talker(talker: Talker) -> Self {
        let [gga, gsa, rmc, vtg] = talker.prefixes();
        Self {
            gga: GgaDecoder::new(gga),
            gsa: GsaDecoder::new(gsa),
            rmc: RmcDecoder::new(rmc),
            vtg: VtgDecoder::new(vtg),
        }
    }
}

impl Default for StandardDecoders {
    fn default() -> Self {
        Self::for_talker(Talker::Gps)
    }
}
