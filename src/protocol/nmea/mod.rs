//! NMEA-0183 sentence pipeline: line framing and checksum validation,
//! comma tokenization, prefix-keyed dispatch to decoders, typed navigation events.
//!
//! Wire format: `$PREFIX,field1,...,fieldN*HH\r\n`, where `HH` is the XOR of every
//! byte between `$` and `*` (both excluded) written as two hexadecimal digits.
//!
//! Processing is stateless across lines: nothing is buffered beyond the line
//! being decoded.

pub mod decoders;
pub mod event;
pub mod feed;
pub mod fields;
pub mod registry;
pub mod sentence;

/// Line buffer size. NMEA caps sentences at 82 characters; the margin absorbs
/// proprietary sentences and stray whitespace.
pub const MAX_SENTENCE_LEN: usize = 96;

/// Maximum number of comma-separated fields in one sentence, prefix included.
pub const MAX_FIELDS: usize = 24;

/// Maximum prefix length kept in registry errors.
pub const MAX_PREFIX_LEN: usize = 16;

/// Owned copy of a sentence prefix (e.g. `$GPGGA`), used in error reports.
pub type PrefixName = heapless::String<MAX_PREFIX_LEN>;

/// Copy `prefix` into a [`PrefixName`], truncated at the capacity.
pub fn prefix_name(prefix: &str) -> PrefixName {
    let mut name = PrefixName::new();
    for c in prefix.chars() {
        if name.push(c).is_err() {
            break;
        }
    }
    name
}
