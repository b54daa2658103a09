//! Multi-byte register assembly. Register maps are byte oriented, so every
//! 16-bit value and every packed ADC code is rebuilt here from individual bytes,
//! always with an explicit [`ByteOrder`].
use crate::core::ByteOrder;

impl ByteOrder {
    /// Assemble an unsigned 16-bit value from two consecutive register bytes.
    #[inline]
    pub fn decode_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    /// Assemble a two's-complement 16-bit value from two consecutive register bytes.
    #[inline]
    pub fn decode_i16(self, bytes: [u8; 2]) -> i16 {
        self.decode_u16(bytes) as i16
    }

    /// Split a 16-bit value into the two bytes sent to consecutive registers.
    #[inline]
    pub fn encode_u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    /// Decode `out.len()` consecutive 16-bit values from `bytes`.
    ///
    /// `bytes` must hold exactly `2 * out.len()` bytes; extra trailing bytes are ignored
    /// and missing ones leave the tail of `out` untouched.
    pub fn decode_u16_slice(self, bytes: &[u8], out: &mut [u16]) {
        for (value, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
            *value = self.decode_u16([pair[0], pair[1]]);
        }
    }

    /// Encode `values` into `out` (two bytes per value). Returns the number of bytes written.
    pub fn encode_u16_slice(self, values: &[u16], out: &mut [u8]) -> usize {
        let mut written = 0;
        for (value, pair) in values.iter().zip(out.chunks_exact_mut(2)) {
            pair.copy_from_slice(&self.encode_u16(*value));
            written += 2;
        }
        written
    }
}

/// Pack a 20-bit ADC code from its MSB, LSB and XLSB registers.
///
/// The XLSB register carries the four least significant bits in its upper nibble.
#[inline]
pub fn pack_adc20(msb: u8, lsb: u8, xlsb: u8) -> u32 {
    ((msb as u32) << 12) | ((lsb as u32) << 4) | ((xlsb as u32) >> 4)
}

/// Pack a 16-bit ADC code transmitted MSB first.
#[inline]
pub fn pack_adc16(msb: u8, lsb: u8) -> u32 {
    ByteOrder::BigEndian.decode_u16([msb, lsb]) as u32
}

/// Assemble a 12-bit signed value whose upper eight bits sit in `high` and lower
/// nibble in `low_nibble`, sign-extended from bit 11.
#[inline]
pub fn pack_i12(high: u8, low_nibble: u8) -> i16 {
    ((high as i8 as i16) << 4) | ((low_nibble & 0x0F) as i16)
}
