//! Register transport layer: the transaction executor contract, the retrying
//! register API built on it, and concrete I2C/SPI/shared-bus executors.
//!
//! ## Retry policy
//!
//! Every operation that touches the bus is attempted up to
//! [`MAX_TRANSACTION_ATTEMPTS`] times. There is no delay between attempts: the
//! transport is local and fast, and callers that need pacing (conversion waits,
//! status polling) sleep explicitly outside this layer.

pub mod i2c;
pub mod register_bus;
pub mod shared;
pub mod spi;
pub mod traits;

/// Attempts per logical register operation (one try plus three retries).
///
/// # Rationale
///
/// - A transient NACK or arbitration loss usually clears on the next attempt.
/// - A hung transport must report failure on each attempt instead of blocking,
///   so the ceiling bounds the whole operation.
pub const MAX_TRANSACTION_ATTEMPTS: u8 = 4;
