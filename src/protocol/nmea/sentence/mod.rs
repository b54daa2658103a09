//! Sentence framing: locate the checksum delimiter, validate the XOR checksum,
//! and split the validated text into fields.
//!
//! Framing steps for one line:
//! 1. Strip the line terminator.
//! 2. Find the *last* `*`; none means the line is malformed.
//! 3. The text before it must start with `$`; the rest is the payload.
//! 4. The text after it must be exactly two hex digits (case-insensitive) equal
//!    to the XOR of the payload bytes.
//! 5. Split `$PREFIX,...` on `,`; field 0 is the prefix.
use core::fmt::Write;

use heapless::{String, Vec};

use crate::error::{FieldDecodeError, LineFault};
use crate::protocol::nmea::MAX_FIELDS;

/// Checksum-validated sentence split into fields.
///
/// Borrows the line it was parsed from; `fields()[0]` is the prefix (e.g. `$GPGGA`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmeaSentence<'a> {
    fields: Vec<&'a str, MAX_FIELDS>,
}

impl<'a> NmeaSentence<'a> {
    /// Frame, validate and tokenize one line.
    pub fn parse(line: &'a str) -> Result<Self, LineFault> {
        let line = line.trim_end_matches(['\r', '\n']);

        let star = line.rfind('*').ok_or(LineFault::MissingChecksum)?;
        let (body, digits) = (&line[..star], &line[star + 1..]);

        let payload = body.strip_prefix('$').ok_or(LineFault::MissingStart)?;
        let expected = parse_checksum_digits(digits)?;
        let computed = checksum(payload);
        if expected != computed {
            return Err(LineFault::ChecksumMismatch { expected, computed });
        }

        let mut fields = Vec::new();
        for field in body.split(',') {
            fields.push(field).map_err(|_| LineFault::TooManyFields)?;
        }

        Ok(Self { fields })
    }

    /// Sentence prefix including the `$` (e.g. `$GPGGA`).
    pub fn prefix(&self) -> &'a str {
        // `split` always yields at least one item.
        self.fields.first().copied().unwrap_or("")
    }

    /// Two-letter talker identifier (e.g. `GP`, `GN`).
    pub fn talker(&self) -> &'a str {
        self.prefix().get(1..3).unwrap_or("")
    }

    /// Sentence formatter (e.g. `GGA`).
    pub fn sentence_type(&self) -> &'a str {
        self.prefix().get(3..).unwrap_or("")
    }

    /// Every field, prefix included.
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// Field `index`, possibly empty; `None` past the end of the sentence.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Field `index` when present and non-empty.
    pub fn optional(&self, index: usize) -> Option<&'a str> {
        self.field(index).filter(|field| !field.is_empty())
    }

    /// Field `index`, which must be present and non-empty.
    pub fn required(&self, index: usize) -> Result<&'a str, FieldDecodeError> {
        self.optional(index)
            .ok_or(FieldDecodeError::MissingField { index })
    }
}

/// XOR of every byte of `payload` (the text between `$` and `*`).
pub fn checksum(payload: &str) -> u8 {
    payload.bytes().fold(0, |acc, byte| acc ^ byte)
}

/// Build `$BODY*HH` for a body given without `$`.
///
/// Fails with [`LineFault::TooLong`] when the sentence does not fit in `N` bytes.
pub fn format_sentence<const N: usize>(body: &str) -> Result<String<N>, LineFault> {
    let mut sentence = String::new();
    write!(sentence, "${}*{:02X}", body, checksum(body)).map_err(|_| LineFault::TooLong)?;
    Ok(sentence)
}

fn parse_checksum_digits(digits: &str) -> Result<u8, LineFault> {
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LineFault::BadChecksumDigits);
    }
    u8::from_str_radix(digits, 16).map_err(|_| LineFault::BadChecksumDigits)
}
