//! Damaged and suspicious streams.
use dcmio_core::{ItemSet, Tag, VR};
use dcmio_dictionary_std::{tags, StandardDataDictionary};
use dcmio_parser::dataset::read::Result;
use dcmio_parser::dataset::{AttributeReader, ErrorKind, ReadOptions};
use dcmio_transfer_syntax_registry::entries;

fn read(bytes: &[u8], options: ReadOptions) -> Result<ItemSet> {
    let dict = StandardDataDictionary::new();
    let mut reader =
        AttributeReader::new(bytes, &entries::EXPLICIT_VR_LITTLE_ENDIAN, &dict, options)?;
    reader.read_dataset(|_| false)
}

#[rustfmt::skip]
const NESTED_CORRUPT: &[u8] = &[
    // (0008,0060) CS, len 2
    0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00,
    b'O', b'T',
    // (0008,1140) SQ, undefined length
    0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
    // item, undefined length
    0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF,
    // (0008,1155) UI, len 0x0100, far more than what is left
    0x08, 0x00, 0x55, 0x11, b'U', b'I', 0x00, 0x01,
    b'1', b'.', b'2', 0x00,
];

#[test]
fn corrupt_length_is_reported_with_tag_and_offset() {
    let err = read(
        NESTED_CORRUPT,
        ReadOptions::default().stream_len(NESTED_CORRUPT.len() as u64),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthViolation);
    assert_eq!(err.tag(), Some(tags::REFERENCED_SOP_INSTANCE_UID));
    assert_eq!(err.position(), Some(38));
}

#[test]
fn truncated_value_is_malformed() {
    let err = read(NESTED_CORRUPT, ReadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedStream);
    assert_eq!(err.tag(), Some(tags::REFERENCED_SOP_INSTANCE_UID));
}

#[test]
fn truncated_header_is_malformed() {
    let err = read(&NESTED_CORRUPT[..13], ReadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedStream);
}

/// Best-effort recovery: the blob is kept, not reinterpreted.
#[test]
fn sequence_overrun_is_recovered_within_slack() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        // (0008,1140) SQ, len 24, but the item spans 28 bytes
        0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0x18, 0x00, 0x00, 0x00,
        // item, len 20
        0xFE, 0xFF, 0x00, 0xE0, 0x14, 0x00, 0x00, 0x00,
        // (0008,1150) UI, len 12
        0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x0C, 0x00,
        b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.',
        // last 4 bytes of the value, also the tag of the next attribute
        0x10, 0x00, 0x20, 0x00,
        b'L', b'O', 0x04, 0x00,
        b'I', b'D', b'-', b'7',
    ];
    let set = read(bytes, ReadOptions::default()).unwrap();
    let attr = set.get(tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
    assert_eq!(attr.vr(), VR::UN);
    assert_eq!(attr.value().bytes(), Some(&bytes[12..36]));
    assert_eq!(set.string(tags::PATIENT_ID).as_deref(), Some("ID-7"));

    let err = read(bytes, ReadOptions::default().overrun_slack(2)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthViolation);

    // no room to rewind
    let err = read(bytes, ReadOptions::default().recording_limit(16)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthViolation);
}

#[test]
fn item_overrun_within_sequence_length_is_kept() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        // (0008,1140) SQ, len 28
        0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0x1C, 0x00, 0x00, 0x00,
        // item, len 12, but the attribute spans 20 bytes
        0xFE, 0xFF, 0x00, 0xE0, 0x0C, 0x00, 0x00, 0x00,
        // (0008,1150) UI, len 12
        0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x0C, 0x00,
        b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'2', b'3', b'4',
        // (0010,0020) LO, len 4
        0x10, 0x00, 0x20, 0x00, b'L', b'O', 0x04, 0x00,
        b'I', b'D', b'-', b'7',
    ];
    let set = read(bytes, ReadOptions::default()).unwrap();
    let items = set.items(tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].string(tags::REFERENCED_SOP_CLASS_UID).as_deref(),
        Some("1.2.840.1234")
    );
    assert_eq!(set.string(tags::PATIENT_ID).as_deref(), Some("ID-7"));
}

#[test]
fn item_overrun_in_undefined_sequence_fails() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        // (0008,1140) SQ, undefined length
        0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
        // item, len 10, but the attribute spans 12 bytes
        0xFE, 0xFF, 0x00, 0xE0, 0x0A, 0x00, 0x00, 0x00,
        0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00,
        b'1', b'.', b'2', 0x00,
        0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
    ];
    let err = read(bytes, ReadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthViolation);
    assert_eq!(err.tag(), Some(tags::REFERENCED_IMAGE_SEQUENCE));
}

#[test]
fn stray_delimiters_are_skipped() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        // sequence delimiter out of place
        0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        // (0008,0060) CS, len 2
        0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00,
        b'O', b'T',
    ];
    let set = read(bytes, ReadOptions::default()).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.string(tags::MODALITY).as_deref(), Some("OT"));
}

#[test]
fn missing_item_delimiter() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        // (0008,1140) SQ, undefined length
        0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
        // item, undefined length
        0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF,
        0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00,
        b'1', b'.', b'2', 0x00,
        // sequence delimiter without an item delimiter
        0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        // (0010,0010) PN, len 4
        0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00,
        b'D', b'o', b'e', b' ',
    ];
    let set = read(bytes, ReadOptions::default()).unwrap();
    assert_eq!(set.items(tags::REFERENCED_IMAGE_SEQUENCE).map(<[_]>::len), Some(1));
    assert_eq!(set.string(tags::PATIENT_NAME).as_deref(), Some("Doe"));
}

#[test]
fn unknown_private_vr_stays_un() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        // (0011,1010) UN, len 4
        0x11, 0x00, 0x10, 0x10, b'U', b'N', 0x00, 0x00, 0x04, 0x00, 0x00, 0x00,
        0x01, 0x02, 0x03, 0x04,
    ];
    let set = read(bytes, ReadOptions::default()).unwrap();
    let attr = set.get(Tag(0x0011, 0x1010)).unwrap();
    assert_eq!(attr.vr(), VR::UN);
    assert_eq!(attr.value().bytes(), Some(&[1u8, 2, 3, 4][..]));
}
