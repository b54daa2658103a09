//! Error definitions shared across library modules.
//! Each type models one failure scenario (bus retries, calibration lifecycle,
//! device bring-up, sentence framing, field decoding, registry configuration).
use crate::core::RegisterAddress;
use crate::protocol::nmea::PrefixName;
use thiserror_no_std::Error;

//==================================================================================BUS_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Failures surfaced by [`RegisterBus`](crate::protocol::transport::register_bus::RegisterBus).
pub enum BusError {
    /// Every attempt of the transaction failed or came back short.
    #[error("Bus transaction `{operation}` exceeded {attempts} attempts (register: {address:?})")]
    TransactionExceeded {
        operation: &'static str,
        address: Option<RegisterAddress>,
        attempts: u8,
    },
    /// The payload does not fit in one register transaction.
    #[error("Transfer too long -> requested: {requested}, max: {max}")]
    TransferTooLong { requested: usize, max: usize },
}

//==================================================================================DECODE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Raw register blocks that cannot be interpreted.
pub enum DecodeError {
    /// Block length does not match the register layout.
    #[error("Invalid block length -> expected: {expected}, actual: {actual}")]
    InvalidBlockLength { expected: usize, actual: usize },
}

//==================================================================================COMPENSATION_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Calibration lifecycle violations of the compensation engine.
pub enum CompensationError {
    /// `compensate` was called before the calibration table was loaded.
    #[error("Compensation requested before calibration was loaded")]
    NotCalibrated,
    /// The calibration table is loaded once per engine; build a new engine to reload.
    #[error("Calibration already loaded")]
    AlreadyCalibrated,
    /// Reading the calibration registers failed.
    #[error(transparent)]
    Bus(#[from] BusError),
}

//==================================================================================SENSOR_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors raised by the BME280/BMP280 driver.
pub enum SensorError {
    /// Register access failed after retries.
    #[error(transparent)]
    Bus(#[from] BusError),
    /// Calibration lifecycle error.
    #[error(transparent)]
    Compensation(#[from] CompensationError),
    /// Measurement burst had an unexpected layout.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The chip id register holds an unknown value.
    #[error("Unsupported chip id: {id:#04X}")]
    UnsupportedChip { id: u8 },
    /// The `measuring` status bit never cleared.
    #[error("Conversion did not complete in time")]
    ConversionTimeout,
    /// The `im_update` status bit never cleared after reset.
    #[error("Calibration NVM copy did not complete in time")]
    NvmCopyTimeout,
    /// A measurement was requested while the part is configured for sleep mode.
    #[error("Sensor configured for sleep mode")]
    Asleep,
}

//==================================================================================LINE_FAULT
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Framing/validation failures of one NMEA line. Expected noise on a live
/// serial link: reported as a discard, never as an error.
pub enum LineFault {
    /// Line does not start with `$`.
    #[error("Missing `$` start delimiter")]
    MissingStart,
    /// No `*` checksum delimiter.
    #[error("Missing `*` checksum delimiter")]
    MissingChecksum,
    /// Checksum field is not exactly two hexadecimal digits.
    #[error("Checksum field is not two hex digits")]
    BadChecksumDigits,
    /// XOR of the payload differs from the transmitted checksum.
    #[error("Checksum mismatch -> expected: {expected:#04X}, computed: {computed:#04X}")]
    ChecksumMismatch { expected: u8, computed: u8 },
    /// More comma-separated fields than the sentence buffer holds.
    #[error("Too many fields")]
    TooManyFields,
    /// Raw line bytes are not valid UTF-8.
    #[error("Line is not valid UTF-8")]
    NotUtf8,
    /// Raw line does not fit the line buffer.
    #[error("Line too long")]
    TooLong,
}

//==================================================================================FIELD_DECODE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Field-level failures inside one decoder; scoped to that sentence only.
pub enum FieldDecodeError {
    /// Required field is absent or empty.
    #[error("Missing field at index {index}")]
    MissingField { index: usize },
    /// Field is not a valid number.
    #[error("Invalid number in field `{field}`")]
    InvalidNumber { field: &'static str },
    /// Direction letter outside {N, S, E, W}.
    #[error("Invalid direction letter `{letter}`")]
    InvalidDirection { letter: char },
    /// Valid direction letter used on the wrong axis (e.g. `E` for a latitude).
    #[error("Hemisphere does not match the coordinate axis")]
    UnexpectedHemisphere,
    /// Time of day is not `hhmmss[.sss]` or out of range.
    #[error("Invalid time of day")]
    InvalidTime,
    /// Date is not `ddmmyy` or out of range.
    #[error("Invalid date")]
    InvalidDate,
    /// Numeric field outside its documented range.
    #[error("Field `{field}` out of range")]
    OutOfRange { field: &'static str },
}

//==================================================================================REGISTRY_ERROR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Decoder registry configuration and dispatch errors.
pub enum RegistryError {
    /// A decoder already owns this prefix.
    #[error("Duplicate decoder prefix {prefix}")]
    DuplicateDecoderPrefix { prefix: PrefixName },
    /// No decoder registered for this prefix.
    #[error("Unknown sentence prefix {prefix}")]
    UnknownSentencePrefix { prefix: PrefixName },
    /// Registry storage is full.
    #[error("Registry full (capacity {capacity})")]
    RegistryFull { capacity: usize },
}

//==================================================================================FEED_ERROR
#[derive(Error, Debug)]
/// Termination reasons of the navigation feed.
pub enum FeedError<E: core::fmt::Debug> {
    /// The line source failed or reached its end.
    #[error("Line source error: {0:?}")]
    Source(E),
}
