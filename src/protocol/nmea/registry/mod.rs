//! Prefix-keyed decoder registry: owns the dispatch of validated sentences.
//!
//! Per line the registry runs framing and checksum validation, looks the prefix
//! up, and hands the fields to the matching decoder. Outcomes are split in two
//! families:
//! - expected noise on a live link (framing faults, field errors, declined
//!   sentences) comes back as a [`LineOutcome`];
//! - lines nobody registered for are reported as
//!   [`RegistryError::UnknownSentencePrefix`] so the caller can tell them apart.
//!
//! Registration happens once at startup; afterwards the registry is read-only
//! and can be shared by reference.
use heapless::Vec;

use crate::error::{FieldDecodeError, LineFault, RegistryError};
use crate::protocol::nmea::decoders::{SentenceDecoder, StandardDecoders};
use crate::protocol::nmea::event::NavigationEvent;
use crate::protocol::nmea::prefix_name;
use crate::protocol::nmea::sentence::NmeaSentence;

/// Result of processing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The decoder produced an event.
    Event(NavigationEvent),
    /// The decoder accepted the sentence but had nothing to report.
    NoEvent,
    /// The line failed framing or checksum validation.
    Discarded(LineFault),
    /// The decoder rejected a field; scoped to this sentence.
    Rejected(FieldDecodeError),
}

impl LineOutcome {
    /// The produced event, if any.
    pub fn into_event(self) -> Option<NavigationEvent> {
        match self {
            Self::Event(event) => Some(event),
            _ => None,
        }
    }
}

/// Fixed-capacity set of decoders keyed by prefix.
pub struct SentenceDecoderRegistry<'d, const N: usize> {
    decoders: Vec<&'d dyn SentenceDecoder, N>,
}

impl<'d, const N: usize> SentenceDecoderRegistry<'d, N> {
    pub const fn new() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Register one decoder. Prefixes are unique.
    pub fn register(&mut self, decoder: &'d dyn SentenceDecoder) -> Result<(), RegistryError> {
        let prefix = decoder.prefix();
        if self.lookup(prefix).is_some() {
            return Err(RegistryError::DuplicateDecoderPrefix {
                prefix: prefix_name(prefix),
            });
        }
        self.decoders
            .push(decoder)
            .map_err(|_| RegistryError::RegistryFull { capacity: N })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Registered decoder for {=str}", prefix);
        Ok(())
    }

    /// Register the GGA, GSA, RMC and VTG decoders of one talker.
    pub fn register_standard(
        &mut self,
        decoders: &'d StandardDecoders,
    ) -> Result<(), RegistryError> {
        self.register(&decoders.gga)?;
        self.register(&decoders.gsa)?;
        self.register(&decoders.rmc)?;
        self.register(&decoders.vtg)
    }

    /// Decoder owning `prefix`.
    pub fn lookup(&self, prefix: &str) -> Option<&'d dyn SentenceDecoder> {
        self.decoders
            .iter()
            .find(|decoder| decoder.prefix() == prefix)
            .copied()
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.lookup(prefix).is_some()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Hand a validated sentence to the decoder owning its prefix.
    pub fn dispatch(&self, sentence: &NmeaSentence<'_>) -> Result<LineOutcome, RegistryError> {
        let prefix = sentence.prefix();
        let decoder = self
            .lookup(prefix)
            .ok_or_else(|| RegistryError::UnknownSentencePrefix {
                prefix: prefix_name(prefix),
            })?;

        Ok(match decoder.process(sentence) {
            Ok(Some(event)) => LineOutcome::Event(event),
            Ok(None) => LineOutcome::NoEvent,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("{=str} rejected: {}", prefix, err);
                LineOutcome::Rejected(err)
            }
        })
    }

    /// Validate, tokenize and dispatch one text line.
    pub fn process_line(&self, line: &str) -> Result<LineOutcome, RegistryError> {
        match NmeaSentence::parse(line) {
            Ok(sentence) => self.dispatch(&sentence),
            Err(fault) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Line discarded: {}", fault);
                Ok(LineOutcome::Discarded(fault))
            }
        }
    }

    /// [`process_line`](Self::process_line) over raw bytes from a serial link.
    pub fn process_bytes(&self, line: &[u8]) -> Result<LineOutcome, RegistryError> {
        match core::str::from_utf8(line) {
            Ok(text) => self.process_line(text),
            Err(_) => Ok(LineOutcome::Discarded(LineFault::NotUtf8)),
        }
    }
}

impl<const N: usize> Default for SentenceDecoderRegistry<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
