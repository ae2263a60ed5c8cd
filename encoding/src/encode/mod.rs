//! Encoding of attribute headers.
use byteordered::Endianness;
use dcmio_core::{DataElementHeader, Length, Tag, VR};
use snafu::{Backtrace, Snafu};
use std::fmt;
use std::io::{self, Write};
use std::marker::PhantomData;

pub mod basic;
pub mod explicit;
pub mod implicit_le;

/// An error encoding an attribute or item header.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Failed to write tag"))]
    WriteTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write attribute header"))]
    WriteHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item header"))]
    WriteItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item delimiter"))]
    WriteItemDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write sequence delimiter"))]
    WriteSequenceDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    /// The value length does not fit in the 16-bit length field
    /// of a short form header.
    #[snafu(display("Length {} of {} {} does not fit in a short header", len, tag, vr))]
    ShortLengthOverflow {
        tag: Tag,
        vr: VR,
        len: Length,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Writing of the integers found in attribute headers,
/// in one byte order.
pub trait BasicEncode {
    /// The byte order of this encoder.
    fn endianness(&self) -> Endianness;

    /// Encode an unsigned 16-bit integer.
    fn encode_us<W>(&self, to: W, value: u16) -> io::Result<()>
    where
        W: Write;

    /// Encode an unsigned 32-bit integer.
    fn encode_ul<W>(&self, to: W, value: u32) -> io::Result<()>
    where
        W: Write;

    /// Encode an attribute tag, group first.
    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> io::Result<()>
    where
        W: Write,
    {
        self.encode_us(&mut to, tag.group())?;
        self.encode_us(to, tag.element())
    }
}

/// An encoder of attribute headers in one dialect.
pub trait Encode {
    /// Write an attribute tag.
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write;

    /// Write an attribute header,
    /// returning the number of bytes written.
    ///
    /// Fails if the length does not fit in the header's length field.
    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write;

    /// Write an item header of the given length.
    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write;

    /// Write an item delimiter.
    fn encode_item_delimiter<W>(&self, mut to: W) -> Result<()>
    where
        W: Write,
    {
        use snafu::ResultExt;
        self.encode_tag(&mut to, Tag::ITEM_DELIMITER)?;
        to.write_all(&[0u8; 4]).context(WriteItemDelimiterSnafu)
    }

    /// Write a sequence delimiter.
    fn encode_sequence_delimiter<W>(&self, mut to: W) -> Result<()>
    where
        W: Write,
    {
        use snafu::ResultExt;
        self.encode_tag(&mut to, Tag::SEQUENCE_DELIMITER)?;
        to.write_all(&[0u8; 4]).context(WriteSequenceDelimiterSnafu)
    }

    /// The number of bytes taken by the header of an attribute
    /// with the given value representation.
    fn header_len(&self, vr: VR) -> u32;
}

/// The object safe counterpart of [`Encode`]
/// for a fixed writer type,
/// so that the dialect can be chosen at run-time.
pub trait EncodeTo<W: ?Sized> {
    /// See [`Encode::encode_tag`].
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: Write;

    /// See [`Encode::encode_element_header`].
    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: Write;

    /// See [`Encode::encode_item_header`].
    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: Write;

    /// See [`Encode::encode_item_delimiter`].
    fn encode_item_delimiter(&self, to: &mut W) -> Result<()>
    where
        W: Write;

    /// See [`Encode::encode_sequence_delimiter`].
    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()>
    where
        W: Write;

    /// See [`Encode::header_len`].
    fn header_len(&self, vr: VR) -> u32;
}

/// An [`Encode`] implementation bound to the writer type `W`.
pub struct EncoderFor<T, W: ?Sized> {
    inner: T,
    phantom: PhantomData<W>,
}

impl<T, W: ?Sized> EncoderFor<T, W> {
    /// Bind the given encoder to the writer type `W`.
    pub fn new(encoder: T) -> Self {
        EncoderFor {
            inner: encoder,
            phantom: PhantomData,
        }
    }
}

impl<T: fmt::Debug, W: ?Sized> fmt::Debug for EncoderFor<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("EncoderFor").field(&self.inner).finish()
    }
}

impl<T, W: ?Sized> EncodeTo<W> for EncoderFor<T, W>
where
    T: Encode,
    W: Write,
{
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()> {
        self.inner.encode_tag(to, tag)
    }

    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize> {
        self.inner.encode_element_header(to, de)
    }

    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()> {
        self.inner.encode_item_header(to, len)
    }

    fn encode_item_delimiter(&self, to: &mut W) -> Result<()> {
        self.inner.encode_item_delimiter(to)
    }

    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()> {
        self.inner.encode_sequence_delimiter(to)
    }

    fn header_len(&self, vr: VR) -> u32 {
        self.inner.header_len(vr)
    }
}
