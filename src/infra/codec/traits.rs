//! Decoding contracts between raw register bursts and typed values.
use crate::core::RegisterAddress;
use crate::error::DecodeError;

//==================================================================================REGISTER_BLOCK
/// Contiguous register range fetched in a single transaction.
///
/// Block layouts come from device datasheets and are treated as a wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock {
    /// First register of the range (auto-increment start point).
    pub address: RegisterAddress,
    /// Number of consecutive registers.
    pub len: usize,
}

impl RegisterBlock {
    pub const fn new(address: RegisterAddress, len: usize) -> Self {
        Self { address, len }
    }

    /// Fail unless `bytes` covers exactly this block.
    pub fn check(&self, bytes: &[u8]) -> Result<(), DecodeError> {
        if bytes.len() != self.len {
            return Err(DecodeError::InvalidBlockLength {
                expected: self.len,
                actual: bytes.len(),
            });
        }
        Ok(())
    }
}

//==================================================================================FROM_REGISTERS
/// Rebuild a typed value from a raw register burst.
///
/// Implemented by every value read from a device in one transaction.
pub trait FromRegisters: Sized {
    /// Decode `bytes` exactly as read from the device.
    fn from_registers(bytes: &[u8]) -> Result<Self, DecodeError>;
}
