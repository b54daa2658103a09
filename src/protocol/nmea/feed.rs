//! Navigation feed: pulls lines from a [`LineSource`], runs them through a
//! [`SentenceDecoderRegistry`] and forwards every event into a pre-allocated
//! [`embassy_sync::Channel`].
//!
//! Firmware owns the channel and the line buffer size is fixed by
//! [`MAX_SENTENCE_LEN`]; the feed performs no allocation.
use core::fmt::Debug;

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::error::{FeedError, LineFault, RegistryError};
use crate::protocol::nmea::event::NavigationEvent;
use crate::protocol::nmea::registry::{LineOutcome, SentenceDecoderRegistry};
use crate::protocol::nmea::MAX_SENTENCE_LEN;
use crate::protocol::transport::traits::line_source::LineSource;

/// Per-outcome line counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedStats {
    /// Lines read from the source.
    pub lines: u32,
    /// Events forwarded to the channel.
    pub events: u32,
    /// Sentences decoded without an event (no fix, void status).
    pub silent: u32,
    /// Lines dropped by framing or checksum validation.
    pub discarded: u32,
    /// Sentences rejected by their decoder.
    pub rejected: u32,
    /// Valid sentences with no registered decoder.
    pub unknown: u32,
}

impl FeedStats {
    /// Count one line under its outcome. Counters saturate on long-running feeds.
    pub fn record(&mut self, outcome: &Result<LineOutcome, RegistryError>) {
        self.lines = self.lines.saturating_add(1);
        let counter = match outcome {
            Ok(LineOutcome::Event(_)) => &mut self.events,
            Ok(LineOutcome::NoEvent) => &mut self.silent,
            Ok(LineOutcome::Discarded(_)) => &mut self.discarded,
            Ok(LineOutcome::Rejected(_)) => &mut self.rejected,
            // Dispatch only reports unknown prefixes.
            Err(_) => &mut self.unknown,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Runner connecting a line source to the event channel.
pub struct NavigationFeed<'a, 'd, L, const N: usize, const CAP: usize>
where
    L: LineSource,
{
    source: L,
    registry: &'a SentenceDecoderRegistry<'d, N>,
    events: &'a Channel<CriticalSectionRawMutex, NavigationEvent, CAP>,
    stats: FeedStats,
}

impl<'a, 'd, L, const N: usize, const CAP: usize> NavigationFeed<'a, 'd, L, N, CAP>
where
    L: LineSource,
    L::Error: Debug,
{
    pub fn new(
        source: L,
        registry: &'a SentenceDecoderRegistry<'d, N>,
        events: &'a Channel<CriticalSectionRawMutex, NavigationEvent, CAP>,
    ) -> Self {
        Self {
            source,
            registry,
            events,
            stats: FeedStats::default(),
        }
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Read, decode and forward a single line. Waits for channel space when an
    /// event is produced.
    pub async fn poll_line(&mut self) -> Result<(), FeedError<L::Error>> {
        let mut buffer = [0u8; MAX_SENTENCE_LEN];
        let len = self
            .source
            .next_line(&mut buffer)
            .await
            .map_err(FeedError::Source)?;
        let outcome = if len > buffer.len() {
            Ok(LineOutcome::Discarded(LineFault::TooLong))
        } else {
            self.registry.process_bytes(&buffer[..len])
        };

        self.stats.record(&outcome);
        match outcome {
            Ok(LineOutcome::Event(event)) => self.events.send(event).await,
            Err(RegistryError::UnknownSentencePrefix { prefix: _prefix }) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("No decoder for {=str}", _prefix.as_str());
            }
            _ => {}
        }
        Ok(())
    }

    /// Drive the feed until the source fails. Returns the final counters with
    /// the error.
    pub async fn drive(mut self) -> (FeedStats, FeedError<L::Error>) {
        loop {
            if let Err(err) = self.poll_line().await {
                #[cfg(feature = "defmt")]
                defmt::error!("Navigation feed stopped: {}", self.stats);
                return (self.stats, err);
            }
        }
    }

    /// Give the line source back.
    pub fn release(self) -> L {
        self.source
    }
}
