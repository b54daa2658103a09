//! Factory trimming coefficients.
//!
//! The table is read from three non-contiguous register blocks, once per device
//! lifetime, and never changes afterwards.
use crate::core::ByteOrder;
use crate::error::BusError;
use crate::infra::codec::endian::pack_i12;
use crate::protocol::transport::register_bus::RegisterBus;
use crate::protocol::transport::traits::transport::Transport;
use crate::sensors::bme280::registers::{CALIB_HUM_H1, CALIB_HUM_REST, CALIB_TEMP_PRESS};

const LE: ByteOrder = ByteOrder::LittleEndian;

/// Temperature, pressure and humidity trimming parameters, named after the
/// datasheet's `dig_*` registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationTable {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    /// 12-bit signed.
    pub dig_h4: i16,
    /// 12-bit signed.
    pub dig_h5: i16,
    pub dig_h6: i8,
}

impl CalibrationTable {
    /// Read the three calibration blocks (0x88/24, 0xA1/1, 0xE1/7): exactly three
    /// burst reads, no retries beyond the bus's own.
    pub fn load<T: Transport>(bus: &mut RegisterBus<T>) -> Result<Self, BusError> {
        let mut temp_press = [0u8; CALIB_TEMP_PRESS.len];
        let mut h1 = [0u8; CALIB_HUM_H1.len];
        let mut humidity = [0u8; CALIB_HUM_REST.len];

        bus.read_registers(CALIB_TEMP_PRESS.address, &mut temp_press)?;
        bus.read_registers(CALIB_HUM_H1.address, &mut h1)?;
        bus.read_registers(CALIB_HUM_REST.address, &mut humidity)?;

        Ok(Self::from_blocks(&temp_press, &h1, &humidity))
    }

    /// Decode the raw calibration blocks.
    pub fn from_blocks(temp_press: &[u8; 24], h1: &[u8; 1], humidity: &[u8; 7]) -> Self {
        let word = |index: usize| LE.decode_u16([temp_press[2 * index], temp_press[2 * index + 1]]);
        let signed = |index: usize| word(index) as i16;

        Self {
            dig_t1: word(0),
            dig_t2: signed(1),
            dig_t3: signed(2),
            dig_p1: word(3),
            dig_p2: signed(4),
            dig_p3: signed(5),
            dig_p4: signed(6),
            dig_p5: signed(7),
            dig_p6: signed(8),
            dig_p7: signed(9),
            dig_p8: signed(10),
            dig_p9: signed(11),
            dig_h1: h1[0],
            dig_h2: LE.decode_i16([humidity[0], humidity[1]]),
            dig_h3: humidity[2],
            // 0xE4 holds H4[11:4], 0xE5 holds H5[3:0] << 4 | H4[3:0], 0xE6 holds H5[11:4].
            dig_h4: pack_i12(humidity[3], humidity[4] & 0x0F),
            dig_h5: pack_i12(humidity[5], humidity[4] >> 4),
            dig_h6: humidity[6] as i8,
        }
    }
}
