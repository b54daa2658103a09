//! Abstraction traits used by the transport layer (bus transaction executor,
//! line source and sampling timer).
pub mod line_source;
pub mod sample_timer;
pub mod transport;
