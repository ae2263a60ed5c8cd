//! Explicit VR decoders, in little endian and big endian.

use crate::decode::{
    BadSequenceHeaderSnafu, Decode, DecodeFrom, ReadHeaderTagSnafu, ReadItemHeaderSnafu,
    ReadItemLengthSnafu, ReadLengthSnafu, ReadReservedSnafu, ReadTagSnafu, ReadVrSnafu, Result,
};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmio_core::{Tag, VR};
use snafu::ResultExt;
use std::fmt;
use std::io::Read;
use std::marker::PhantomData;

/// A data element decoder for the Explicit VR Little Endian transfer syntax.
pub type ExplicitVRLittleEndianDecoder = ExplicitVRDecoder<LittleEndian>;

/// A data element decoder for the Explicit VR Big Endian transfer syntax.
pub type ExplicitVRBigEndianDecoder = ExplicitVRDecoder<BigEndian>;

/// A data element decoder for explicit VR transfer syntaxes
/// in the byte order `O`.
pub struct ExplicitVRDecoder<O> {
    order: PhantomData<O>,
}

impl<O> Default for ExplicitVRDecoder<O> {
    fn default() -> Self {
        ExplicitVRDecoder { order: PhantomData }
    }
}

impl<O> Clone for ExplicitVRDecoder<O> {
    fn clone(&self) -> Self {
        ExplicitVRDecoder::default()
    }
}

impl<O> Copy for ExplicitVRDecoder<O> {}

impl<O> fmt::Debug for ExplicitVRDecoder<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExplicitVRDecoder")
            .field("byte_order", &std::any::type_name::<O>())
            .finish()
    }
}

impl<O> Decode for ExplicitVRDecoder<O>
where
    O: ByteOrder,
{
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadHeaderTagSnafu)?;
        let group = O::read_u16(&buf[0..2]);
        let element = O::read_u16(&buf[2..4]);

        if group == 0xFFFE {
            // item delimiters do not have VR or reserved field
            source.read_exact(&mut buf).context(ReadItemLengthSnafu)?;
            let len = O::read_u32(&buf);
            return Ok((
                DataElementHeader::new((group, element), VR::UN, Length(len)),
                8, // tag + len
            ));
        }

        // retrieve explicit VR
        source.read_exact(&mut buf[0..2]).context(ReadVrSnafu)?;
        let vr = VR::from_binary([buf[0], buf[1]]).unwrap_or(VR::UN);

        // PS3.5 7.1.2: short form VRs are followed by a 16-bit length,
        // all others by 2 reserved bytes and a 32-bit length
        if vr.has_short_length() {
            source.read_exact(&mut buf[0..2]).context(ReadLengthSnafu)?;
            let len = u32::from(O::read_u16(&buf[0..2]));
            Ok((DataElementHeader::new((group, element), vr, Length(len)), 8))
        } else {
            source
                .read_exact(&mut buf[0..2])
                .context(ReadReservedSnafu)?;
            source.read_exact(&mut buf).context(ReadLengthSnafu)?;
            let len = O::read_u32(&buf);
            Ok((DataElementHeader::new((group, element), vr, Length(len)), 12))
        }
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf).context(ReadItemHeaderSnafu)?;
        let group = O::read_u16(&buf[0..2]);
        let element = O::read_u16(&buf[2..4]);
        let len = O::read_u32(&buf[4..8]);

        SequenceItemHeader::new((group, element), Length(len)).context(BadSequenceHeaderSnafu)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        Ok(Tag(O::read_u16(&buf[0..2]), O::read_u16(&buf[2..4])))
    }
}

impl<S: ?Sized, O> DecodeFrom<S> for ExplicitVRDecoder<O>
where
    S: Read,
    O: ByteOrder,
{
    #[inline]
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)> {
        Decode::decode_header(self, source)
    }

    #[inline]
    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader> {
        Decode::decode_item_header(self, source)
    }

    #[inline]
    fn decode_tag(&self, source: &mut S) -> Result<Tag> {
        Decode::decode_tag(self, source)
    }
}
