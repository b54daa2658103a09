//! Calibrated sensor drivers layered on [`RegisterBus`](crate::protocol::transport::register_bus::RegisterBus).
pub mod bme280;
pub mod sampler;
