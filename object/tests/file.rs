use dcmio_core::{ItemSet, VR};
use dcmio_dictionary_std::{tags, uids};
use dcmio_object::{
    from_reader, open_file, FileDicomObject, FileMetaTableBuilder, OpenFileOptions, ReadError,
    ReadPreamble,
};
use pretty_assertions::assert_eq;
use std::io::{Read, Write};

/// A file meta group of 106 bytes after its group length,
/// declaring explicit VR little endian.
#[rustfmt::skip]
fn meta_group() -> Vec<u8> {
    [
        // (0002,0000) UL, len 4, 106
        &[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 0x6A, 0x00, 0x00, 0x00][..],
        // (0002,0001) OB, len 2
        &[0x02, 0x00, 0x01, 0x00, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01],
        // (0002,0002) UI, len 26
        &[0x02, 0x00, 0x02, 0x00, b'U', b'I', 0x1A, 0x00],
        b"1.2.840.10008.5.1.4.1.1.7\0",
        // (0002,0003) UI, len 6
        &[0x02, 0x00, 0x03, 0x00, b'U', b'I', 0x06, 0x00],
        b"1.2.3\0",
        // (0002,0010) UI, len 20
        &[0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00],
        b"1.2.840.10008.1.2.1\0",
        // (0002,0012) UI, len 8
        &[0x02, 0x00, 0x12, 0x00, b'U', b'I', 0x08, 0x00],
        b"1.2.3.4\0",
    ]
    .concat()
}

/// (0028,0010) US 5, explicit VR little endian
const ROWS_5: &[u8] = &[0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x05, 0x00];

fn minimal_file() -> Vec<u8> {
    let mut bytes = vec![0; 128];
    bytes.extend_from_slice(b"DICM");
    bytes.extend(meta_group());
    bytes.extend_from_slice(ROWS_5);
    bytes
}

fn image_object(ts: &str) -> FileDicomObject {
    let meta = FileMetaTableBuilder::new()
        .transfer_syntax(ts)
        .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
        .media_storage_sop_instance_uid("2.25.42")
        .build()
        .unwrap();
    let mut dataset = ItemSet::new();
    dataset.put_str(tags::PATIENT_ID, VR::LO, "P-0001");
    dataset.put_ints(tags::ROWS, VR::US, &[4]);
    dataset.put_ints(tags::COLUMNS, VR::US, &[2]);
    dataset.put_bytes(tags::PIXEL_DATA, VR::OW, (0u8..16).collect::<Vec<_>>());
    FileDicomObject::new(meta, dataset)
}

fn temp_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn minimal_file_is_reencoded_identically() {
    let bytes = minimal_file();
    let obj = from_reader(&bytes[..]).unwrap();

    let meta = obj.meta().unwrap();
    assert_eq!(meta.transfer_syntax(), uids::EXPLICIT_VR_LITTLE_ENDIAN);
    assert_eq!(meta.media_storage_sop_instance_uid(), "1.2.3");
    assert_eq!(meta.information_group_length, 106);
    assert_eq!(obj.len(), 1);
    assert_eq!(obj.int(tags::ROWS), Some(5));

    let mut out = Vec::new();
    obj.write_all(&mut out).unwrap();
    assert_eq!(out, bytes);
}

#[test]
fn open_from_path() {
    let file = temp_file(&minimal_file());
    let obj = open_file(file.path()).unwrap();
    assert_eq!(obj.int(tags::ROWS), Some(5));

    let dir = tempfile::tempdir().unwrap();
    let copy = dir.path().join("copy.dcm");
    obj.write_to_file(&copy).unwrap();
    assert_eq!(std::fs::read(&copy).unwrap(), minimal_file());
}

#[test]
fn preamble_modes() {
    // magic code and meta group, no preamble
    let mut bytes = b"DICM".to_vec();
    bytes.extend(meta_group());
    bytes.extend_from_slice(ROWS_5);

    let auto = from_reader(&bytes[..]).unwrap();
    assert_eq!(auto.int(tags::ROWS), Some(5));

    let never = OpenFileOptions::new()
        .read_preamble(ReadPreamble::Never)
        .from_reader(&bytes[..])
        .unwrap();
    assert_eq!(never, auto);

    let err = OpenFileOptions::new()
        .read_preamble(ReadPreamble::Always)
        .from_reader(&bytes[..])
        .unwrap_err();
    assert!(matches!(err, ReadError::MissingMagicCode { .. }));

    let always = OpenFileOptions::new()
        .read_preamble(ReadPreamble::Always)
        .from_reader(&minimal_file()[..])
        .unwrap();
    assert_eq!(always, auto);
}

#[test]
fn bare_data_sets_are_sniffed() {
    let explicit = from_reader(ROWS_5).unwrap();
    assert!(explicit.meta().is_none());
    assert_eq!(explicit.int(tags::ROWS), Some(5));

    // (0028,0010) US 5, implicit VR little endian
    let implicit: &[u8] = &[0x28, 0x00, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00, 0x05, 0x00];
    let obj = from_reader(implicit).unwrap();
    assert_eq!(obj.get(tags::ROWS).unwrap().vr(), VR::US);
    assert_eq!(obj.int(tags::ROWS), Some(5));
}

#[test]
fn unresolvable_data_set() {
    let err = from_reader(&[0xFF, 0xFF, 0xFF, 0xFF][..]).unwrap_err();
    assert!(matches!(err, ReadError::ResolveDialect { .. }));
}

#[test]
fn truncated_data_set() {
    let mut bytes = minimal_file();
    bytes.pop();
    let err = from_reader(&bytes[..]).unwrap_err();
    assert_eq!(err.kind(), Some(dcmio_parser::dataset::ErrorKind::MalformedStream));
}

#[test]
fn round_trip_in_every_transfer_syntax() {
    for ts in &[
        uids::IMPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_BIG_ENDIAN,
        uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    ] {
        let obj = image_object(ts);
        let mut out = Vec::new();
        obj.write_all(&mut out).unwrap();

        let read = from_reader(&out[..]).unwrap();
        assert_eq!(read.meta().unwrap().transfer_syntax(), *ts);
        assert_eq!(read, obj, "in {}", ts);
        assert_eq!(read.int(tags::ROWS), Some(4));
        assert_eq!(read.string(tags::PATIENT_ID).as_deref(), Some("P-0001"));
    }
}

#[test]
fn deflated_data_set_is_compressed() {
    let obj = image_object(uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN);
    let mut out = Vec::new();
    obj.write_all(&mut out).unwrap();

    let mut meta_len = Vec::new();
    obj.write_meta(&mut meta_len).unwrap();
    let body = &out[132 + meta_len.len()..];

    let mut inflated = Vec::new();
    flate2::read::DeflateDecoder::new(body)
        .read_to_end(&mut inflated)
        .unwrap();
    let mut plain = Vec::new();
    image_object(uids::EXPLICIT_VR_LITTLE_ENDIAN)
        .write_dataset(&mut plain)
        .unwrap();
    assert_eq!(inflated, plain);
}

#[test]
fn read_until_pixel_data() {
    let mut out = Vec::new();
    image_object(uids::EXPLICIT_VR_LITTLE_ENDIAN)
        .write_all(&mut out)
        .unwrap();

    let obj = OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .from_reader(&out[..])
        .unwrap();
    assert_eq!(obj.len(), 3);
    assert!(obj.get(tags::PIXEL_DATA).is_none());
    assert_eq!(obj.int(tags::COLUMNS), Some(2));

    let all = OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .read_all()
        .from_reader(&out[..])
        .unwrap();
    assert_eq!(all.len(), 4);
}

#[test]
fn pixel_data_by_source_uri() {
    let obj = image_object(uids::EXPLICIT_VR_LITTLE_ENDIAN);
    let mut out = Vec::new();
    obj.write_all(&mut out).unwrap();
    let file = temp_file(&out);

    let read = OpenFileOptions::new().uri().open_file(file.path()).unwrap();
    let bulk = read.bulk_data(tags::PIXEL_DATA).unwrap();
    assert_eq!(bulk.length(), 16);
    assert_eq!(bulk.file_path().as_deref(), Some(file.path()));
    // the value is the last 16 bytes of the file
    assert_eq!(bulk.offset(), out.len() as u64 - 16);

    let mut again = Vec::new();
    read.write_all(&mut again).unwrap();
    assert_eq!(again, out);
}

#[test]
fn pixel_data_spooled() {
    let obj = image_object(uids::EXPLICIT_VR_BIG_ENDIAN);
    let mut out = Vec::new();
    obj.write_all(&mut out).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let read = OpenFileOptions::new()
        .spool_in(dir.path())
        .from_reader(&out[..])
        .unwrap();
    let bulk = read.bulk_data(tags::PIXEL_DATA).unwrap();
    assert_eq!(bulk.offset(), 0);
    assert_eq!(bulk.length(), 16);
    assert!(bulk.is_big_endian());

    let spool = read.spool_path().unwrap().to_path_buf();
    assert!(spool.starts_with(dir.path()));
    assert_eq!(bulk.file_path().as_deref(), Some(spool.as_path()));

    let mut again = Vec::new();
    read.write_all(&mut again).unwrap();
    assert_eq!(again, out);

    drop(read);
    assert!(!spool.exists());
}

#[test]
fn relative_paths_are_resolved() {
    let obj = image_object(uids::EXPLICIT_VR_LITTLE_ENDIAN);
    let mut out = Vec::new();
    obj.write_all(&mut out).unwrap();

    let dir = tempfile::tempdir_in(".").unwrap();
    let relative = dir.path().join("a.dcm");
    assert!(relative.is_relative());
    std::fs::write(&relative, &out).unwrap();

    let read = OpenFileOptions::new().uri().open_file(&relative).unwrap();
    let bulk = read.bulk_data(tags::PIXEL_DATA).unwrap();
    let expected = std::env::current_dir().unwrap().join(&relative);
    assert_eq!(bulk.file_path(), Some(expected));
    let mut again = Vec::new();
    read.write_all(&mut again).unwrap();
    assert_eq!(again, out);

    let read = OpenFileOptions::new()
        .spool_in(dir.path())
        .from_reader(&out[..])
        .unwrap();
    let bulk = read.bulk_data(tags::PIXEL_DATA).unwrap();
    assert_eq!(bulk.length(), 16);
    let mut again = Vec::new();
    read.write_all(&mut again).unwrap();
    assert_eq!(again, out);
}

#[test]
fn nothing_spooled_without_bulk_data() {
    let dir = tempfile::tempdir().unwrap();
    let obj = OpenFileOptions::new()
        .spool_in(dir.path())
        .from_reader(&minimal_file()[..])
        .unwrap();
    assert!(obj.spool_path().is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn nested_sequence_round_trip() {
    let meta = FileMetaTableBuilder::new()
        .transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN)
        .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
        .media_storage_sop_instance_uid("2.25.43")
        .build()
        .unwrap();
    let mut inner = ItemSet::new();
    inner.put_str(tags::REFERENCED_SOP_CLASS_UID, VR::UI, uids::CT_IMAGE_STORAGE);
    inner.put_str(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, "1.2.3.4.5");
    let mut outer = ItemSet::new();
    outer.put_sequence(tags::REFERENCED_SERIES_SEQUENCE, vec![inner.clone(), inner]);
    let mut dataset = ItemSet::new();
    dataset.put_sequence(tags::REFERENCED_SERIES_SEQUENCE, vec![outer]);
    dataset.put_ints(tags::ROWS, VR::US, &[5]);
    let obj = FileDicomObject::new(meta, dataset);

    let mut out = Vec::new();
    obj.write_all(&mut out).unwrap();
    let read = from_reader(&out[..]).unwrap();
    assert_eq!(read, obj);

    let items = read.items(tags::REFERENCED_SERIES_SEQUENCE).unwrap();
    assert_eq!(items.len(), 1);
    let nested = items[0].items(tags::REFERENCED_SERIES_SEQUENCE).unwrap();
    assert_eq!(nested.len(), 2);
    assert_eq!(
        nested[1].string(tags::REFERENCED_SOP_INSTANCE_UID).as_deref(),
        Some("1.2.3.4.5")
    );
}
