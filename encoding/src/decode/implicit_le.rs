//! Implicit VR Little Endian syntax transfer implementation

use crate::decode::basic::LittleEndianBasicDecoder;
use crate::decode::{
    BadSequenceHeaderSnafu, BasicDecode, Decode, DecodeFrom, ReadHeaderTagSnafu,
    ReadItemHeaderSnafu, ReadLengthSnafu, ReadTagSnafu, Result,
};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmio_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmio_core::{Tag, VR};
use snafu::ResultExt;
use std::fmt;
use std::io::Read;

/// A data element decoder for the Implicit VR Little Endian transfer syntax.
/// This type contains an attribute dictionary for resolving
/// value representations.
///
/// Attributes which are not in the dictionary,
/// or whose representation depends on the context
/// (such as _Pixel Data_),
/// are decoded with the `UN` placeholder.
#[derive(Clone)]
pub struct ImplicitVRLittleEndianDecoder<D> {
    dict: D,
    basic: LittleEndianBasicDecoder,
}

impl<D> fmt::Debug for ImplicitVRLittleEndianDecoder<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ImplicitVRLittleEndianDecoder")
            .field("dict", &"«omitted»")
            .field("basic", &self.basic)
            .finish()
    }
}

impl<D> ImplicitVRLittleEndianDecoder<D>
where
    D: DataDictionary,
{
    /// Create this decoder using the given data dictionary.
    pub fn with_dict(dictionary: D) -> Self {
        ImplicitVRLittleEndianDecoder {
            dict: dictionary,
            basic: LittleEndianBasicDecoder,
        }
    }

    /// The dictionary used to resolve value representations.
    pub fn dict(&self) -> &D {
        &self.dict
    }
}

impl<D> Decode for ImplicitVRLittleEndianDecoder<D>
where
    D: DataDictionary,
{
    fn decode_header<S>(&self, mut source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        let tag = self
            .basic
            .decode_tag(&mut source)
            .context(ReadHeaderTagSnafu)?;

        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadLengthSnafu)?;
        let len = LittleEndian::read_u32(&buf);

        let vr = if tag.group() == 0xFFFE {
            VR::UN
        } else {
            self.dict
                .by_tag(tag)
                .and_then(|entry| entry.vr().exact())
                .unwrap_or(VR::UN)
        };
        Ok((DataElementHeader::new(tag, vr, Length(len)), 8))
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf).context(ReadItemHeaderSnafu)?;
        let group = LittleEndian::read_u16(&buf[0..2]);
        let element = LittleEndian::read_u16(&buf[2..4]);
        let len = LittleEndian::read_u32(&buf[4..8]);
        SequenceItemHeader::new((group, element), Length(len)).context(BadSequenceHeaderSnafu)
    }

    #[inline]
    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        self.basic.decode_tag(source).context(ReadTagSnafu)
    }
}

impl<S: ?Sized, D> DecodeFrom<S> for ImplicitVRLittleEndianDecoder<D>
where
    S: Read,
    D: DataDictionary,
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

#[cfg(test)]
mod tests {
    use super::ImplicitVRLittleEndianDecoder;
    use crate::decode::Decode;
    use dcmio_core::dictionary::StubDataDictionary;
    use dcmio_core::header::{HasLength, Header, Length, VR};
    use dcmio_core::Tag;
    use dcmio_dictionary_std::StandardDataDictionary;
    use std::io::{Cursor, Read};

    // manually crafting some DICOM data elements
    //   Tag: (0002,0002) Media Storage SOP Class UID
    //   Length: 26
    //   Value: "1.2.840.10008.5.1.4.1.1.1" (with 1 padding '\0')
    // --
    //   Tag: (0002,0010) Transfer Syntax UID
    //   Length: 20
    //   Value: "1.2.840.10008.1.2.1" (w 1 padding '\0') == ExplicitVRLittleEndian
    // --
    const RAW: &[u8; 62] = &[
        0x02, 0x00, 0x02, 0x00, 0x1a, 0x00, 0x00, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x38, 0x34, 0x30,
        0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x35, 0x2e, 0x31, 0x2e, 0x34, 0x2e, 0x31, 0x2e,
        0x31, 0x2e, 0x31, 0x00, 0x02, 0x00, 0x10, 0x00, 0x14, 0x00, 0x00, 0x00, 0x31, 0x2e, 0x32,
        0x2e, 0x38, 0x34, 0x30, 0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x31, 0x2e, 0x32, 0x2e,
        0x31, 0x00,
    ];

    #[test]
    fn implicit_vr_le_without_dictionary() {
        let reader = ImplicitVRLittleEndianDecoder::with_dict(StubDataDictionary);
        let mut cursor = Cursor::new(RAW.as_ref());

        let (elem, bytes_read) = reader
            .decode_header(&mut cursor)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(0x0002, 0x0002));
        assert_eq!(elem.vr(), VR::UN);
        assert_eq!(elem.length(), Length(26));
        assert_eq!(bytes_read, 8);
        cursor.set_position(34);

        let (elem, _) = reader
            .decode_header(&mut cursor)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(0x0002, 0x0010));
        assert_eq!(elem.length(), Length(20));
        let mut buffer = Vec::new();
        cursor.read_to_end(&mut buffer).unwrap();
        assert_eq!(&buffer[..], b"1.2.840.10008.1.2.1\0");
    }

    #[test]
    fn implicit_vr_le_with_standard_dictionary() {
        let dict = StandardDataDictionary::new();
        let reader = ImplicitVRLittleEndianDecoder::with_dict(&dict);
        let mut cursor = Cursor::new(RAW.as_ref());

        let (elem, _) = reader
            .decode_header(&mut cursor)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(0x0002, 0x0002));
        assert_eq!(elem.vr(), VR::UI);

        // contextual representations are left unresolved
        #[rustfmt::skip]
        let pixel_data: &[u8] = &[
            0xE0, 0x7F, 0x10, 0x00, // (7FE0,0010)
            0x00, 0x01, 0x00, 0x00, // Length: 256
        ];
        let (elem, _) = reader
            .decode_header(&mut Cursor::new(pixel_data))
            .expect("should find an element");
        assert_eq!(elem.vr(), VR::UN);
        assert_eq!(elem.length(), Length(256));
    }

    #[test]
    fn decode_items() {
        let reader = ImplicitVRLittleEndianDecoder::with_dict(StubDataDictionary);
        #[rustfmt::skip]
        let raw: &[u8] = &[
            0xFE, 0xFF, 0x00, 0xE0, // Item
            0xFF, 0xFF, 0xFF, 0xFF, // Length: undefined
            0xFE, 0xFF, 0x0D, 0xE0, // Item Delimitation Item
            0x00, 0x00, 0x00, 0x00, // Length: 0
        ];
        let mut cursor = Cursor::new(raw);
        let item = reader.decode_item_header(&mut cursor).unwrap();
        assert!(item.is_item());
        assert!(item.length().is_undefined());
        let delimiter = reader.decode_item_header(&mut cursor).unwrap();
        assert!(delimiter.is_item_delimiter());
    }
}
