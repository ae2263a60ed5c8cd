//! Explicit VR encoders, in little endian and big endian.

use crate::encode::{
    Encode, Result, ShortLengthOverflowSnafu, WriteHeaderSnafu, WriteItemHeaderSnafu,
    WriteTagSnafu,
};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use dcmio_core::header::{DataElementHeader, HasLength, Header};
use dcmio_core::{Tag, VR};
use snafu::ResultExt;
use std::fmt;
use std::io::Write;
use std::marker::PhantomData;

/// A concrete encoder for the transfer syntax ExplicitVRLittleEndian
pub type ExplicitVRLittleEndianEncoder = ExplicitVREncoder<LittleEndian>;

/// A concrete encoder for the transfer syntax ExplicitVRBigEndian
pub type ExplicitVRBigEndianEncoder = ExplicitVREncoder<BigEndian>;

/// An attribute header encoder for explicit VR transfer syntaxes
/// in the byte order `O`.
pub struct ExplicitVREncoder<O> {
    order: PhantomData<O>,
}

impl<O> Default for ExplicitVREncoder<O> {
    fn default() -> Self {
        ExplicitVREncoder { order: PhantomData }
    }
}

impl<O> Clone for ExplicitVREncoder<O> {
    fn clone(&self) -> Self {
        ExplicitVREncoder::default()
    }
}

impl<O> Copy for ExplicitVREncoder<O> {}

impl<O> fmt::Debug for ExplicitVREncoder<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExplicitVREncoder")
            .field("byte_order", &std::any::type_name::<O>())
            .finish()
    }
}

impl<O> Encode for ExplicitVREncoder<O>
where
    O: ByteOrder,
{
    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 4];
        O::write_u16(&mut buf[..], tag.group());
        O::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, mut to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        let tag = de.tag();
        if tag.group() == 0xFFFE {
            // items and delimiters carry no VR
            let mut buf = [0u8; 8];
            O::write_u16(&mut buf[0..], tag.group());
            O::write_u16(&mut buf[2..], tag.element());
            O::write_u32(&mut buf[4..], de.length().0);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            return Ok(8);
        }

        let vr_bytes = de.vr().to_bytes();
        if de.vr().has_short_length() {
            let len = de.length();
            if len.is_undefined() || len.0 > 0xFFFF {
                return ShortLengthOverflowSnafu {
                    tag,
                    vr: de.vr(),
                    len,
                }
                .fail();
            }
            let mut buf = [0u8; 8];
            O::write_u16(&mut buf[0..], tag.group());
            O::write_u16(&mut buf[2..], tag.element());
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            O::write_u16(&mut buf[6..], len.0 as u16);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(8)
        } else {
            let mut buf = [0u8; 12];
            O::write_u16(&mut buf[0..], tag.group());
            O::write_u16(&mut buf[2..], tag.element());
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            // buf[6..8] is kept zeroed (reserved)
            O::write_u32(&mut buf[8..], de.length().0);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(12)
        }
    }

    fn encode_item_header<W>(&self, mut to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 8];
        O::write_u16(&mut buf, 0xFFFE);
        O::write_u16(&mut buf[2..], 0xE000);
        O::write_u32(&mut buf[4..], len);
        to.write_all(&buf).context(WriteItemHeaderSnafu)
    }

    fn header_len(&self, vr: VR) -> u32 {
        vr.explicit_header_len()
    }
}
