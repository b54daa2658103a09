//! Minimal abstraction for a bus transaction executor. Allows the library to
//! plug into various implementations (embedded HAL, shared bus, test double).
use crate::core::{Phase, RegisterAccess, RegisterAddress, TransactionResult};

/// Contract to run one atomic transaction (a sequence of write/read phases)
/// against a single device.
///
/// Implementations must never block indefinitely: a hung bus reports
/// [`TransactionResult::failed`] instead.
pub trait Transport {
    /// Execute `phases` in order as one uninterrupted transaction.
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult;

    /// Map a register address to the byte put on the wire for the given access.
    ///
    /// Identity by default (I2C). SPI devices override it to carry the R/W flag.
    fn register_address(&self, address: RegisterAddress, _access: RegisterAccess) -> u8 {
        address
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        (**self).execute(phases)
    }

    fn register_address(&self, address: RegisterAddress, access: RegisterAccess) -> u8 {
        (**self).register_address(address, access)
    }
}
