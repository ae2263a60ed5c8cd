//! Module containing the DICOM Transfer Syntax data structure and related methods.
//! The `TransferSyntax` descriptor holds everything needed to pick
//! the attribute header decoder and encoder of a transfer syntax,
//! as well as the data set adapter of deflated transfer syntaxes.
//!
//! This crate does not host specific transfer syntaxes. Instead, they are
//! listed in the `dcmio-transfer-syntax-registry` crate, which implements
//! [`TransferSyntaxIndex`].
//!
//! [`TransferSyntaxIndex`]: ./trait.TransferSyntaxIndex.html

use crate::decode::basic::BasicDecoder;
use crate::decode::explicit::{ExplicitVRBigEndianDecoder, ExplicitVRLittleEndianDecoder};
use crate::decode::implicit_le::ImplicitVRLittleEndianDecoder;
use crate::decode::DecodeFrom;
use crate::encode::basic::BasicEncoder;
use crate::encode::explicit::{ExplicitVRBigEndianEncoder, ExplicitVRLittleEndianEncoder};
use crate::encode::implicit_le::ImplicitVRLittleEndianEncoder;
use crate::encode::{EncodeTo, EncoderFor};
use dcmio_core::dictionary::DataDictionary;
use dcmio_core::VR;
use std::fmt;
use std::io::{self, Read, Write};

pub use byteordered::Endianness;

/// A decoder with its type erased.
pub type DynDecoder<'d, S> = Box<dyn DecodeFrom<S> + 'd>;

/// An encoder with its type erased.
pub type DynEncoder<'w, W> = Box<dyn EncodeTo<W> + 'w>;

/// A DICOM transfer syntax specifier.
#[derive(Debug, Clone, Copy)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// The transfer syntax' requirements and implemented capabilities.
    codec: Codec,
}

/// Trait for containers of transfer syntax specifiers.
///
/// Types implementing this trait are held responsible for populating
/// themselves with a set of transfer syntaxes.
pub trait TransferSyntaxIndex {
    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of trailing null characters (`\0`) in `uid`.
    fn get(&self, uid: &str) -> Option<&TransferSyntax>;
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

/// A description and possible implementation regarding
/// the encoding and decoding requirements of a transfer syntax.
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    /// No codec is given, nor is it required.
    None,
    /// The pixel data is encapsulated in fragments.
    /// The data set itself is read and written as is,
    /// and the fragments are kept in their encapsulated form.
    EncapsulatedPixelData,
    /// The data set following the file meta group
    /// is wrapped by the given adapter, such as a compressor.
    Dataset(&'static dyn DataRWAdapter),
}

/// A writer of adapted data which must be finished explicitly,
/// such as a compressor.
pub trait FinishWrite: Write {
    /// Write any trailing data and flush the underlying writer.
    ///
    /// Dropping the writer without calling this
    /// releases its resources but may leave the output incomplete.
    fn finish(self: Box<Self>) -> io::Result<()>;
}

/// An adapter of byte read and write streams,
/// applied to the data set of a transfer syntax.
pub trait DataRWAdapter: fmt::Debug + Send + Sync {
    /// Adapt a byte reader.
    ///
    /// The adapter may need to look ahead in the stream,
    /// which is why this may fail.
    fn adapt_reader<'r>(&self, reader: Box<dyn Read + 'r>) -> io::Result<Box<dyn Read + 'r>>;

    /// Adapt a byte writer.
    fn adapt_writer<'w>(&self, writer: Box<dyn Write + 'w>) -> Box<dyn FinishWrite + 'w>;
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    ///
    /// Note that only transfer syntax implementors are expected to construct
    /// TS descriptors from scratch. For a practical usage of transfer syntaxes,
    /// one should look up an existing transfer syntax registry by UID.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        codec: Codec,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            codec,
        }
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Whether data is encoded in big endian.
    pub fn is_big_endian(&self) -> bool {
        self.byte_order == Endianness::Big
    }

    /// Whether headers carry an explicit value representation.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Obtain this transfer syntax' codec specification.
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Whether the data set is deflated.
    pub fn is_deflated(&self) -> bool {
        matches!(self.codec, Codec::Dataset(_))
    }

    /// The data set adapter of this transfer syntax, if any.
    pub fn dataset_adapter(&self) -> Option<&'static dyn DataRWAdapter> {
        match self.codec {
            Codec::Dataset(adapter) => Some(adapter),
            _ => None,
        }
    }

    /// Whether pixel data is kept in encapsulated form.
    pub fn is_encapsulated_pixel_data(&self) -> bool {
        matches!(self.codec, Codec::EncapsulatedPixelData)
    }

    /// Retrieve the appropriate attribute header decoder for this transfer syntax
    /// and given reader type.
    /// The dictionary is only used by implicit VR decoders.
    ///
    /// Yields `None` for implicit VR big endian,
    /// which is not a valid DICOM encoding.
    ///
    /// The resulting decoder does not consider data set compression rules.
    /// This means that the consumer of this method
    /// needs to adapt the reader before using the decoder.
    pub fn decoder_for<'d, S, D>(&self, dict: D) -> Option<DynDecoder<'d, S>>
    where
        S: ?Sized + Read + 'd,
        D: DataDictionary + 'd,
    {
        match (self.byte_order, self.explicit_vr) {
            (Endianness::Little, false) => {
                Some(Box::new(ImplicitVRLittleEndianDecoder::with_dict(dict)))
            }
            (Endianness::Little, true) => Some(Box::new(ExplicitVRLittleEndianDecoder::default())),
            (Endianness::Big, true) => Some(Box::new(ExplicitVRBigEndianDecoder::default())),
            (Endianness::Big, false) => None,
        }
    }

    /// Retrieve the appropriate attribute header encoder for this transfer syntax
    /// and the given writer type.
    /// Yields `None` for implicit VR big endian.
    /// The resulting encoder does not consider data set compression rules.
    pub fn encoder_for<'w, W>(&self) -> Option<DynEncoder<'w, W>>
    where
        W: ?Sized + Write + 'w,
    {
        match (self.byte_order, self.explicit_vr) {
            (Endianness::Little, false) => Some(Box::new(EncoderFor::new(
                ImplicitVRLittleEndianEncoder::default(),
            ))),
            (Endianness::Little, true) => Some(Box::new(EncoderFor::new(
                ExplicitVRLittleEndianEncoder::default(),
            ))),
            (Endianness::Big, true) => Some(Box::new(EncoderFor::new(
                ExplicitVRBigEndianEncoder::default(),
            ))),
            (Endianness::Big, false) => None,
        }
    }

    /// Obtain a dynamic basic decoder, based on this transfer syntax' expected endianness.
    pub fn basic_decoder(&self) -> BasicDecoder {
        BasicDecoder::from(self.endianness())
    }

    /// Obtain a dynamic basic encoder, based on this transfer syntax' expected endianness.
    pub fn basic_encoder(&self) -> BasicEncoder {
        BasicEncoder::from(self.endianness())
    }

    /// The number of bytes in the header of an attribute
    /// with the given value representation.
    pub fn header_len(&self, vr: VR) -> u32 {
        if self.explicit_vr {
            vr.explicit_header_len()
        } else {
            8
        }
    }
}

impl PartialEq for TransferSyntax {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}
