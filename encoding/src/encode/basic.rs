//! Encoders of the integers in attribute headers,
//! in little or big endian.

use super::BasicEncode;
use byteordered::{ByteOrdered, Endianness};
use std::io::Write;

type Result<T> = std::io::Result<T>;

macro_rules! impl_basic_encode {
    ($t: ty, $ctor: ident, $endianness: expr) => {
        impl BasicEncode for $t {
            fn endianness(&self) -> Endianness {
                $endianness
            }

            fn encode_us<S: Write>(&self, to: S, value: u16) -> Result<()> {
                ByteOrdered::$ctor(to).write_u16(value)
            }

            fn encode_ul<S: Write>(&self, to: S, value: u32) -> Result<()> {
                ByteOrdered::$ctor(to).write_u32(value)
            }
        }
    };
}

/// Little endian header integers.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LittleEndianBasicEncoder;

impl_basic_encode!(LittleEndianBasicEncoder, le, Endianness::Little);

/// Big endian header integers.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BigEndianBasicEncoder;

impl_basic_encode!(BigEndianBasicEncoder, be, Endianness::Big);

/// A basic encoder whose byte order is picked at run-time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BasicEncoder {
    LE(LittleEndianBasicEncoder),
    BE(BigEndianBasicEncoder),
}

use self::BasicEncoder::{BE, LE};

impl From<Endianness> for BasicEncoder {
    fn from(endianness: Endianness) -> Self {
        match endianness {
            Endianness::Little => LE(LittleEndianBasicEncoder),
            Endianness::Big => BE(BigEndianBasicEncoder),
        }
    }
}

impl BasicEncode for BasicEncoder {
    fn endianness(&self) -> Endianness {
        match *self {
            LE(_) => Endianness::Little,
            BE(_) => Endianness::Big,
        }
    }

    fn encode_us<S: Write>(&self, to: S, value: u16) -> Result<()> {
        match self {
            LE(e) => e.encode_us(to, value),
            BE(e) => e.encode_us(to, value),
        }
    }

    fn encode_ul<S: Write>(&self, to: S, value: u32) -> Result<()> {
        match self {
            LE(e) => e.encode_ul(to, value),
            BE(e) => e.encode_ul(to, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::Tag;

    fn encode_all<T: BasicEncode>(encoder: T) -> Vec<u8> {
        let mut out = Vec::new();
        encoder.encode_us(&mut out, 0x0102).unwrap();
        encoder.encode_ul(&mut out, 0x0304_0506).unwrap();
        encoder.encode_tag(&mut out, Tag(0x0708, 0x090A)).unwrap();
        out
    }

    #[test]
    fn basic_encoders() {
        #[rustfmt::skip]
        let le: &[u8] = &[
            0x02, 0x01,
            0x06, 0x05, 0x04, 0x03,
            0x08, 0x07, 0x0A, 0x09,
        ];
        #[rustfmt::skip]
        let be: &[u8] = &[
            0x01, 0x02,
            0x03, 0x04, 0x05, 0x06,
            0x07, 0x08, 0x09, 0x0A,
        ];
        assert_eq!(encode_all(BasicEncoder::from(Endianness::Little)), le);
        assert_eq!(encode_all(BasicEncoder::from(Endianness::Big)), be);
    }
}
