//! High-level components: the register transport layer and the NMEA-0183
//! sentence pipeline.
pub mod nmea;
pub mod transport;
