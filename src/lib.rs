//! `periph-telemetry` library: the pieces every peripheral driver leans on in a
//! `no_std` environment. The crate exposes a retrying register transport over
//! I2C/SPI, the fixed-point compensation engine of Bosch BME280/BMP280 sensors,
//! and an NMEA-0183 sentence pipeline (framing, checksum, decoder dispatch).
#![cfg_attr(not(test), no_std)]
//==================================================================================
/// Core data types shared by the transport, sensor and NMEA layers.
pub mod core;
/// Error taxonomy (bus, compensation, sensor, sentence framing and decoding).
pub mod error;
/// Byte-order codecs used to assemble multi-byte register values.
pub mod infra;
/// Register transport (I2C/SPI/shared bus) and the NMEA-0183 sentence pipeline.
pub mod protocol;
/// Calibrated sensor drivers built on the register transport.
pub mod sensors;
//==================================================================================
