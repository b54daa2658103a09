//! Byte-level codecs: multi-byte register assembly and raw block decoding contracts.
pub mod endian;
pub mod traits;
