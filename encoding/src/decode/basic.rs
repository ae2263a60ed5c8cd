//! Decoders of the integers in attribute headers,
//! in little or big endian.

use super::BasicDecode;
use byteordered::{ByteOrdered, Endianness};
use std::io::Read;

type Result<T> = std::io::Result<T>;

macro_rules! impl_basic_decode {
    ($t: ty, $ctor: ident, $endianness: expr) => {
        impl BasicDecode for $t {
            fn endianness(&self) -> Endianness {
                $endianness
            }

            fn decode_us<S: Read>(&self, source: S) -> Result<u16> {
                ByteOrdered::$ctor(source).read_u16()
            }

            fn decode_ul<S: Read>(&self, source: S) -> Result<u32> {
                ByteOrdered::$ctor(source).read_u32()
            }
        }
    };
}

/// Little endian header integers.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct LittleEndianBasicDecoder;

impl_basic_decode!(LittleEndianBasicDecoder, le, Endianness::Little);

/// Big endian header integers.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct BigEndianBasicDecoder;

impl_basic_decode!(BigEndianBasicDecoder, be, Endianness::Big);

/// A basic decoder whose byte order is picked at run-time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BasicDecoder {
    LE(LittleEndianBasicDecoder),
    BE(BigEndianBasicDecoder),
}

use self::BasicDecoder::{BE, LE};

impl From<Endianness> for BasicDecoder {
    fn from(endianness: Endianness) -> Self {
        match endianness {
            Endianness::Little => LE(LittleEndianBasicDecoder),
            Endianness::Big => BE(BigEndianBasicDecoder),
        }
    }
}

impl BasicDecode for BasicDecoder {
    fn endianness(&self) -> Endianness {
        match *self {
            LE(_) => Endianness::Little,
            BE(_) => Endianness::Big,
        }
    }

    fn decode_us<S: Read>(&self, source: S) -> Result<u16> {
        match self {
            LE(e) => e.decode_us(source),
            BE(e) => e.decode_us(source),
        }
    }

    fn decode_ul<S: Read>(&self, source: S) -> Result<u32> {
        match self {
            LE(e) => e.decode_ul(source),
            BE(e) => e.decode_ul(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::Tag;

    #[test]
    fn header_integers_in_both_byte_orders() {
        let data: &[u8] = &[0xC3, 0x3C, 0x33, 0xCC];

        let le = BasicDecoder::from(Endianness::Little);
        let be = BasicDecoder::from(Endianness::Big);

        assert_eq!(le.decode_us(data).unwrap(), 0x3CC3);
        assert_eq!(be.decode_us(data).unwrap(), 0xC33C);
        assert_eq!(le.decode_ul(data).unwrap(), 0xCC33_3CC3);
        assert_eq!(be.decode_ul(data).unwrap(), 0xC33C_33CC);
        assert_eq!(le.decode_tag(data).unwrap(), Tag(0x3CC3, 0xCC33));
        assert_eq!(be.decode_tag(data).unwrap(), Tag(0xC33C, 0x33CC));
    }
}
