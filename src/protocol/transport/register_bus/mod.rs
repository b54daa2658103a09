//! Register-oriented API over a [`Transport`]: every logical operation becomes one
//! bounded, retried transaction, with explicit byte order on multi-byte values.
//!
//! Address and payload of a register write always travel in a single contiguous
//! write phase so the target's register pointer auto-increments across the payload.
//! Reads go through an internal scratch buffer: the caller's buffer is only
//! written once a transaction fully succeeds, never with partial data.
use crate::core::{
    expected_len, ByteOrder, Phase, RegisterAccess, RegisterAddress, MAX_TRANSFER_LEN,
};
use crate::error::BusError;
use crate::protocol::transport::traits::transport::Transport;
use crate::protocol::transport::MAX_TRANSACTION_ATTEMPTS;

/// Retrying register access wrapper owning one transport.
#[derive(Debug)]
pub struct RegisterBus<T: Transport> {
    transport: T,
}

impl<T: Transport> RegisterBus<T> {
    /// Wrap a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Shared access to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exclusive access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    //==================================================================================WRITE
    /// Write one raw byte (no register address).
    pub fn write_byte(&mut self, value: u8) -> Result<(), BusError> {
        self.run("write_byte", None, &mut [Phase::Write(&[value])])
    }

    /// Write raw bytes (no register address) in one transaction.
    pub fn write_bytes(&mut self, values: &[u8]) -> Result<(), BusError> {
        self.run("write_bytes", None, &mut [Phase::Write(values)])
    }

    /// Write `value` to the register at `address`.
    pub fn write_register(&mut self, address: RegisterAddress, value: u8) -> Result<(), BusError> {
        self.write_prefixed("write_register", address, &[value])
    }

    /// Write `values` to consecutive registers starting at `address`.
    pub fn write_registers(
        &mut self,
        address: RegisterAddress,
        values: &[u8],
    ) -> Result<(), BusError> {
        self.write_prefixed("write_registers", address, values)
    }

    /// Write a 16-bit value to two consecutive registers.
    pub fn write_u16(
        &mut self,
        address: RegisterAddress,
        value: u16,
        order: ByteOrder,
    ) -> Result<(), BusError> {
        self.write_prefixed("write_u16", address, &order.encode_u16(value))
    }

    /// Write consecutive 16-bit values starting at `address`.
    pub fn write_u16s(
        &mut self,
        address: RegisterAddress,
        values: &[u16],
        order: ByteOrder,
    ) -> Result<(), BusError> {
        let byte_len = values.len() * 2;
        check_len(byte_len)?;

        let mut payload = [0u8; MAX_TRANSFER_LEN];
        let written = order.encode_u16_slice(values, &mut payload[..byte_len]);
        self.write_prefixed("write_u16s", address, &payload[..written])
    }

    //==================================================================================READ
    /// Write `write` then read `read.len()` bytes in one transaction.
    pub fn write_then_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), BusError> {
        self.read_into("write_then_read", None, write, read)
    }

    /// Read the register at `address`.
    pub fn read_register(&mut self, address: RegisterAddress) -> Result<u8, BusError> {
        let mut value = [0u8; 1];
        let wire = self.transport.register_address(address, RegisterAccess::Read);
        self.read_into("read_register", Some(address), &[wire], &mut value)?;
        Ok(value[0])
    }

    /// Fill `buffer` from consecutive registers starting at `address`.
    pub fn read_registers(
        &mut self,
        address: RegisterAddress,
        buffer: &mut [u8],
    ) -> Result<(), BusError> {
        let wire = self.transport.register_address(address, RegisterAccess::Read);
        self.read_into("read_registers", Some(address), &[wire], buffer)
    }

    /// Read a 16-bit value from two consecutive registers.
    pub fn read_u16(&mut self, address: RegisterAddress, order: ByteOrder) -> Result<u16, BusError> {
        let mut raw = [0u8; 2];
        let wire = self.transport.register_address(address, RegisterAccess::Read);
        self.read_into("read_u16", Some(address), &[wire], &mut raw)?;
        Ok(order.decode_u16(raw))
    }

    /// Fill `values` with consecutive 16-bit values starting at `address`.
    pub fn read_u16s(
        &mut self,
        address: RegisterAddress,
        values: &mut [u16],
        order: ByteOrder,
    ) -> Result<(), BusError> {
        let byte_len = values.len() * 2;
        check_len(byte_len)?;

        let mut raw = [0u8; MAX_TRANSFER_LEN];
        let wire = self.transport.register_address(address, RegisterAccess::Read);
        self.read_into("read_u16s", Some(address), &[wire], &mut raw[..byte_len])?;
        order.decode_u16_slice(&raw[..byte_len], values);
        Ok(())
    }

    //==================================================================================INTERNALS
    /// Prefix `payload` with the wire address and send both in one write phase.
    fn write_prefixed(
        &mut self,
        operation: &'static str,
        address: RegisterAddress,
        payload: &[u8],
    ) -> Result<(), BusError> {
        check_len(payload.len())?;

        let mut frame = [0u8; MAX_TRANSFER_LEN + 1];
        frame[0] = self.transport.register_address(address, RegisterAccess::Write);
        frame[1..=payload.len()].copy_from_slice(payload);

        self.run(
            operation,
            Some(address),
            &mut [Phase::Write(&frame[..=payload.len()])],
        )
    }

    /// Write-then-read through the scratch buffer; `out` is only touched on success.
    fn read_into(
        &mut self,
        operation: &'static str,
        address: Option<RegisterAddress>,
        write: &[u8],
        out: &mut [u8],
    ) -> Result<(), BusError> {
        check_len(out.len())?;

        let mut scratch = [0u8; MAX_TRANSFER_LEN];
        let scratch = &mut scratch[..out.len()];
        self.run(
            operation,
            address,
            &mut [Phase::Write(write), Phase::Read(&mut *scratch)],
        )?;
        out.copy_from_slice(scratch);
        Ok(())
    }

    /// Execute `phases` until one attempt moves every byte, at most
    /// [`MAX_TRANSACTION_ATTEMPTS`] times.
    fn run(
        &mut self,
        operation: &'static str,
        address: Option<RegisterAddress>,
        phases: &mut [Phase<'_>],
    ) -> Result<(), BusError> {
        let expected = expected_len(phases);

        for _attempt in 1..=MAX_TRANSACTION_ATTEMPTS {
            let result = self.transport.execute(phases);
            if result.is_complete(expected) {
                return Ok(());
            }

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "{} attempt {} failed: {}/{} bytes, success={}",
                operation,
                _attempt,
                result.bytes_transferred,
                expected,
                result.success
            );
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "{} gave up after {} attempts (register {})",
            operation,
            MAX_TRANSACTION_ATTEMPTS,
            address
        );

        Err(BusError::TransactionExceeded {
            operation,
            address,
            attempts: MAX_TRANSACTION_ATTEMPTS,
        })
    }
}

fn check_len(requested: usize) -> Result<(), BusError> {
    if requested > MAX_TRANSFER_LEN {
        return Err(BusError::TransferTooLong {
            requested,
            max: MAX_TRANSFER_LEN,
        });
    }
    Ok(())
}
