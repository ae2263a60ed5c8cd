//! DICOM attribute header encoding and decoding primitives.
//!
//! This crate provides the decoders and encoders
//! of attribute headers, item headers and delimiters
//! in each of the supported dialects
//! (explicit or implicit value representation, little or big endian),
//! plus the [transfer syntax specifier],
//! which selects the right ones at run-time.
//!
//! Values are not interpreted at this level:
//! once a header is decoded, the source points at the value bytes.
//!
//! For the time being, all APIs are based on synchronous I/O.
//!
//! [transfer syntax specifier]: ./transfer_syntax/index.html

pub mod decode;
pub mod encode;
pub mod transfer_syntax;

pub use byteordered;
pub use decode::Decode;
pub use encode::Encode;
pub use transfer_syntax::{Codec, TransferSyntax, TransferSyntaxIndex};
