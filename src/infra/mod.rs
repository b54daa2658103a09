//! Low-level infrastructure shared by the protocol and sensor layers.
pub mod codec;
