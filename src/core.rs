//! Defines the "data contract" shared by the register transport, the sensor
//! drivers and the sentence pipeline.
//!
//! Transport implementations consume [`Phase`] lists and answer with a
//! [`TransactionResult`]; everything above them works in terms of
//! [`RegisterAddress`] and an explicit [`ByteOrder`].

/// 8-bit identifier of a device register.
pub type RegisterAddress = u8;

/// Largest payload (address byte excluded) carried by one register transaction.
pub const MAX_TRANSFER_LEN: usize = 32;

/// Assembly order of multi-byte register values.
///
/// Every multi-byte access names one explicitly; there is no default because
/// peripherals on the same bus disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// Least significant byte at the lowest register address.
    LittleEndian,
    /// Most significant byte at the lowest register address.
    BigEndian,
}

/// Direction of a register access, used by transports whose wire protocol
/// encodes it inside the register address byte (SPI read flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAccess {
    Read,
    Write,
}

/// One step of a bus transaction.
#[derive(Debug)]
pub enum Phase<'a> {
    /// Bytes sent to the device.
    Write(&'a [u8]),
    /// Buffer filled with bytes received from the device.
    Read(&'a mut [u8]),
}

impl Phase<'_> {
    /// Number of bytes moved by this phase.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Phase::Write(bytes) => bytes.len(),
            Phase::Read(buffer) => buffer.len(),
        }
    }

    /// Checks whether the phase moves no byte at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome reported by a transport for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransactionResult {
    /// Bytes effectively written and read.
    pub bytes_transferred: usize,
    /// Transport-level success flag.
    pub success: bool,
}

impl TransactionResult {
    /// Successful transaction that moved `bytes_transferred` bytes.
    pub const fn completed(bytes_transferred: usize) -> Self {
        Self {
            bytes_transferred,
            success: true,
        }
    }

    /// Failed transaction; nothing is considered transferred.
    pub const fn failed() -> Self {
        Self {
            bytes_transferred: 0,
            success: false,
        }
    }

    /// A transaction only counts when the transport says so *and* every byte of
    /// every phase went through.
    #[inline]
    pub fn is_complete(&self, expected: usize) -> bool {
        self.success && self.bytes_transferred == expected
    }
}

/// Total byte count of a phase list.
pub fn expected_len(phases: &[Phase<'_>]) -> usize {
    phases.iter().map(Phase::len).sum()
}
