//! Stateful decoding and encoding of attribute streams,
//! bound to a byte source or sink and a transfer syntax
//! which can change mid-stream.

pub mod decode;
pub mod encode;
