//! Decoding of attribute headers.

use byteordered::Endianness;
use dcmio_core::header::{DataElementHeader, SequenceItemHeader, SequenceItemHeaderError};
use dcmio_core::Tag;
use snafu::{Backtrace, Snafu};
use std::io::{self, Read};

pub mod basic;
pub mod explicit;
pub mod implicit_le;

/// An error decoding an attribute or item header.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not read the attribute tag"))]
    ReadHeaderTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read the item tag"))]
    ReadItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read the item length"))]
    ReadItemLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read a tag"))]
    ReadTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read the reserved bytes after the VR"))]
    ReadReserved {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read the value length"))]
    ReadLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read the VR"))]
    ReadVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Invalid item or delimiter header"))]
    BadSequenceHeader { source: SequenceItemHeaderError },
}

impl Error {
    /// Whether the error was caused by the source ending
    /// before the header could be read in full.
    pub fn is_eof(&self) -> bool {
        match self {
            Error::ReadHeaderTag { source, .. }
            | Error::ReadItemHeader { source, .. }
            | Error::ReadItemLength { source, .. }
            | Error::ReadTag { source, .. }
            | Error::ReadReserved { source, .. }
            | Error::ReadLength { source, .. }
            | Error::ReadVr { source, .. } => source.kind() == io::ErrorKind::UnexpectedEof,
            Error::BadSequenceHeader { .. } => false,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reading of the primitive numbers found in attribute headers,
/// in one byte order.
pub trait BasicDecode {
    /// The byte order of this decoder.
    fn endianness(&self) -> Endianness;

    /// Decode an unsigned 16-bit integer.
    fn decode_us<S>(&self, source: S) -> io::Result<u16>
    where
        S: Read;

    /// Decode an unsigned 32-bit integer.
    fn decode_ul<S>(&self, source: S) -> io::Result<u32>
    where
        S: Read;

    /// Decode an attribute tag, group first.
    fn decode_tag<S>(&self, mut source: S) -> io::Result<Tag>
    where
        S: Read,
    {
        let g = self.decode_us(&mut source)?;
        let e = self.decode_us(source)?;
        Ok(Tag(g, e))
    }
}

/// A decoder of attribute headers in one dialect.
pub trait Decode {
    /// Decode the next attribute header,
    /// returning it with the number of bytes it took.
    ///
    /// Item and delimiter headers are decoded too, with a `UN` VR.
    /// The source is left at the start of the value.
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read;

    /// Decode the next item or delimiter header.
    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read;

    /// Decode an attribute tag.
    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read;
}

/// The object safe counterpart of [`Decode`]
/// for a fixed source type,
/// so that the dialect can be chosen at run-time.
pub trait DecodeFrom<S: ?Sized + Read> {
    /// See [`Decode::decode_header`].
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)>;

    /// See [`Decode::decode_item_header`].
    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader>;

    /// See [`Decode::decode_tag`].
    fn decode_tag(&self, source: &mut S) -> Result<Tag>;
}
