//! Module containing the DICOM file meta information table,
//! its reader and its writer.
//!
//! The file meta group is always encoded in explicit VR little endian,
//! right after the preamble and the `DICM` magic code.
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmio_core::{Attribute, ItemSet, Tag, VR};
use dcmio_dictionary_std::{tags, StandardDataDictionary};
use dcmio_parser::dataset::read::{self, AttributeReader, ReadOptions};
use dcmio_parser::dataset::write::{self, AttributeWriter, WriteOptions};
use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::convert::TryFrom;
use std::io::{self, Read, Write};
use tracing::warn;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The attributes of the file meta group could not be read.
    #[snafu(display("Could not read file meta group"))]
    ReadGroup {
        #[snafu(backtrace)]
        source: read::Error,
    },

    /// A required file meta attribute is missing.
    #[snafu(display("Missing attribute `{}`", alias))]
    MissingElement {
        alias: &'static str,
        backtrace: Backtrace,
    },

    /// The value of a textual attribute is not valid text.
    #[snafu(display("Attribute `{}` does not hold valid text", alias))]
    InvalidText {
        alias: &'static str,
        source: std::string::FromUtf8Error,
        backtrace: Backtrace,
    },

    /// An attribute with a fixed length has a value of another length.
    #[snafu(display("Unexpected length {} for attribute {}", length, tag))]
    UnexpectedDataValueLength {
        tag: Tag,
        length: usize,
        backtrace: Backtrace,
    },

    /// The group does not fit the 32-bit group length.
    #[snafu(display("File meta group of {} bytes is too long", length))]
    GroupTooLong { length: u64, backtrace: Backtrace },

    /// The file meta group could not be written.
    #[snafu(display("Could not write file meta group"))]
    WriteSet {
        #[snafu(backtrace)]
        source: write::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// DICOM File Meta Information Table.
///
/// Textual values are kept as found in the file,
/// trailing padding included.
/// Use the accessor methods for the values without padding.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaTable {
    /// File Meta Information Group Length
    pub information_group_length: u32,
    /// File Meta Information Version
    pub information_version: [u8; 2],
    /// Media Storage SOP Class UID
    pub media_storage_sop_class_uid: String,
    /// Media Storage SOP Instance UID
    pub media_storage_sop_instance_uid: String,
    /// Transfer Syntax UID
    pub transfer_syntax: String,
    /// Implementation Class UID
    pub implementation_class_uid: String,

    /// Implementation Version Name
    pub implementation_version_name: Option<String>,
    /// Source Application Entity Title
    pub source_application_entity_title: Option<String>,
    /// Sending Application Entity Title
    pub sending_application_entity_title: Option<String>,
    /// Receiving Application Entity Title
    pub receiving_application_entity_title: Option<String>,
    /// Private Information Creator UID
    pub private_information_creator_uid: Option<String>,
    /// Private Information
    pub private_information: Option<Vec<u8>>,
}

fn trimmed(s: &str) -> &str {
    s.trim_end_matches(|c| c == '\0' || c == ' ')
}

fn text(set: &ItemSet, tag: Tag, alias: &'static str) -> Result<Option<String>> {
    match set.bytes(tag) {
        Some(bytes) => String::from_utf8(bytes.to_vec())
            .map(Some)
            .context(InvalidTextSnafu { alias }),
        None => Ok(None),
    }
}

fn required_text(set: &ItemSet, tag: Tag, alias: &'static str) -> Result<String> {
    text(set, tag, alias)?.context(MissingElementSnafu { alias })
}

/// The length of the given meta attributes,
/// as written in explicit VR little endian.
fn group_length(set: &ItemSet) -> Result<u32> {
    let writer = AttributeWriter::new(
        io::sink(),
        &EXPLICIT_VR_LITTLE_ENDIAN,
        WriteOptions::default(),
    )
    .context(WriteSetSnafu)?;
    let length = writer.encoded_len(set).context(WriteSetSnafu)?;
    u32::try_from(length)
        .ok()
        .context(GroupTooLongSnafu { length })
}

impl FileMetaTable {
    /// Read the file meta group from a source positioned at its first attribute,
    /// after the magic code.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let dict = StandardDataDictionary::new();
        let mut reader = AttributeReader::new(
            source,
            &EXPLICIT_VR_LITTLE_ENDIAN,
            &dict,
            ReadOptions::default(),
        )
        .context(ReadGroupSnafu)?;
        let set = reader.read_file_meta_group().context(ReadGroupSnafu)?;
        FileMetaTable::from_item_set(&set)
    }

    /// Collect the table from the attributes of a file meta group.
    ///
    /// The four UIDs are required.
    /// A missing group length is computed from the other attributes
    /// and a missing version is assumed to be `00H 01H`.
    pub fn from_item_set(set: &ItemSet) -> Result<Self> {
        let information_version = match set.bytes(tags::FILE_META_INFORMATION_VERSION) {
            Some(bytes) => {
                ensure!(
                    bytes.len() == 2,
                    UnexpectedDataValueLengthSnafu {
                        tag: tags::FILE_META_INFORMATION_VERSION,
                        length: bytes.len(),
                    }
                );
                [bytes[0], bytes[1]]
            }
            None => [0, 1],
        };

        let table = FileMetaTable {
            information_group_length: 0,
            information_version,
            media_storage_sop_class_uid: required_text(
                set,
                tags::MEDIA_STORAGE_SOP_CLASS_UID,
                "MediaStorageSOPClassUID",
            )?,
            media_storage_sop_instance_uid: required_text(
                set,
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
                "MediaStorageSOPInstanceUID",
            )?,
            transfer_syntax: required_text(set, tags::TRANSFER_SYNTAX_UID, "TransferSyntax")?,
            implementation_class_uid: required_text(
                set,
                tags::IMPLEMENTATION_CLASS_UID,
                "ImplementationClassUID",
            )?,
            implementation_version_name: text(
                set,
                tags::IMPLEMENTATION_VERSION_NAME,
                "ImplementationVersionName",
            )?,
            source_application_entity_title: text(
                set,
                tags::SOURCE_APPLICATION_ENTITY_TITLE,
                "SourceApplicationEntityTitle",
            )?,
            sending_application_entity_title: text(
                set,
                tags::SENDING_APPLICATION_ENTITY_TITLE,
                "SendingApplicationEntityTitle",
            )?,
            receiving_application_entity_title: text(
                set,
                tags::RECEIVING_APPLICATION_ENTITY_TITLE,
                "ReceivingApplicationEntityTitle",
            )?,
            private_information_creator_uid: text(
                set,
                tags::PRIVATE_INFORMATION_CREATOR_UID,
                "PrivateInformationCreatorUID",
            )?,
            private_information: set
                .bytes(tags::PRIVATE_INFORMATION)
                .map(|bytes| bytes.to_vec()),
        };

        let information_group_length = match set.bytes(tags::FILE_META_INFORMATION_GROUP_LENGTH)
        {
            Some(bytes) => {
                ensure!(
                    bytes.len() == 4,
                    UnexpectedDataValueLengthSnafu {
                        tag: tags::FILE_META_INFORMATION_GROUP_LENGTH,
                        length: bytes.len(),
                    }
                );
                LittleEndian::read_u32(bytes)
            }
            None => {
                warn!("File meta group without group length");
                group_length(&table.attributes())?
            }
        };

        Ok(FileMetaTable {
            information_group_length,
            ..table
        })
    }

    /// The transfer syntax UID, without padding.
    pub fn transfer_syntax(&self) -> &str {
        trimmed(&self.transfer_syntax)
    }

    /// The media storage SOP class UID, without padding.
    pub fn media_storage_sop_class_uid(&self) -> &str {
        trimmed(&self.media_storage_sop_class_uid)
    }

    /// The media storage SOP instance UID, without padding.
    pub fn media_storage_sop_instance_uid(&self) -> &str {
        trimmed(&self.media_storage_sop_instance_uid)
    }

    /// The implementation class UID, without padding.
    pub fn implementation_class_uid(&self) -> &str {
        trimmed(&self.implementation_class_uid)
    }

    /// The implementation version name, without padding.
    pub fn implementation_version_name(&self) -> Option<&str> {
        self.implementation_version_name.as_deref().map(trimmed)
    }

    /// Set the transfer syntax UID,
    /// updating the group length accordingly.
    pub fn set_transfer_syntax(&mut self, uid: &str) -> Result<()> {
        self.transfer_syntax = ui_padded(uid);
        self.update_information_group_length()
    }

    /// Recompute the group length from the current attributes.
    pub fn update_information_group_length(&mut self) -> Result<()> {
        self.information_group_length = group_length(&self.attributes())?;
        Ok(())
    }

    /// The attributes of the table, except for the group length.
    fn attributes(&self) -> ItemSet {
        let mut set = ItemSet::new();
        set.put_bytes(
            tags::FILE_META_INFORMATION_VERSION,
            VR::OB,
            self.information_version.to_vec(),
        );
        set.put_bytes(
            tags::MEDIA_STORAGE_SOP_CLASS_UID,
            VR::UI,
            self.media_storage_sop_class_uid.as_bytes(),
        );
        set.put_bytes(
            tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
            VR::UI,
            self.media_storage_sop_instance_uid.as_bytes(),
        );
        set.put_bytes(
            tags::TRANSFER_SYNTAX_UID,
            VR::UI,
            self.transfer_syntax.as_bytes(),
        );
        set.put_bytes(
            tags::IMPLEMENTATION_CLASS_UID,
            VR::UI,
            self.implementation_class_uid.as_bytes(),
        );

        let optional = [
            (
                tags::IMPLEMENTATION_VERSION_NAME,
                VR::SH,
                &self.implementation_version_name,
            ),
            (
                tags::SOURCE_APPLICATION_ENTITY_TITLE,
                VR::AE,
                &self.source_application_entity_title,
            ),
            (
                tags::SENDING_APPLICATION_ENTITY_TITLE,
                VR::AE,
                &self.sending_application_entity_title,
            ),
            (
                tags::RECEIVING_APPLICATION_ENTITY_TITLE,
                VR::AE,
                &self.receiving_application_entity_title,
            ),
            (
                tags::PRIVATE_INFORMATION_CREATOR_UID,
                VR::UI,
                &self.private_information_creator_uid,
            ),
        ];
        for (tag, vr, value) in optional.iter() {
            if let Some(value) = value {
                set.put_bytes(*tag, *vr, value.as_bytes());
            }
        }
        if let Some(info) = &self.private_information {
            set.put_bytes(tags::PRIVATE_INFORMATION, VR::OB, info.clone());
        }
        set
    }

    /// Obtain the file meta group as an item set,
    /// led by a freshly computed group length.
    pub fn to_item_set(&self) -> Result<ItemSet> {
        let attributes = self.attributes();
        let mut length = [0; 4];
        LittleEndian::write_u32(&mut length, group_length(&attributes)?);
        Ok(std::iter::once(Attribute::new(
            tags::FILE_META_INFORMATION_GROUP_LENGTH,
            VR::UL,
            length.to_vec(),
        ))
        .chain(attributes.iter().cloned())
        .collect())
    }

    /// Write the file meta group to the given writer,
    /// without preamble nor magic code.
    pub fn write<W: Write>(&self, to: W) -> Result<()> {
        let set = self.to_item_set()?;
        let mut writer = AttributeWriter::new(to, &EXPLICIT_VR_LITTLE_ENDIAN, WriteOptions::default())
            .context(WriteSetSnafu)?;
        writer.write_dataset(&set).context(WriteSetSnafu)?;
        writer.finish().context(WriteSetSnafu)
    }
}

/// A builder for DICOM meta information tables.
///
/// ```
/// # use dcmio_object::FileMetaTableBuilder;
/// let meta = FileMetaTableBuilder::new()
///     .transfer_syntax("1.2.840.10008.1.2.1")
///     .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.7")
///     .media_storage_sop_instance_uid("2.25.1")
///     .build()?;
/// assert_eq!(meta.transfer_syntax(), "1.2.840.10008.1.2.1");
/// # Ok::<_, dcmio_object::meta::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct FileMetaTableBuilder {
    information_version: Option<[u8; 2]>,
    media_storage_sop_class_uid: Option<String>,
    media_storage_sop_instance_uid: Option<String>,
    transfer_syntax: Option<String>,
    implementation_class_uid: Option<String>,
    implementation_version_name: Option<String>,
    source_application_entity_title: Option<String>,
    sending_application_entity_title: Option<String>,
    receiving_application_entity_title: Option<String>,
    private_information_creator_uid: Option<String>,
    private_information: Option<Vec<u8>>,
}

fn padded(s: impl Into<String>, pad: char) -> String {
    let mut s = s.into();
    if s.len() % 2 == 1 {
        s.push(pad);
    }
    s
}

/// Pad with a trailing null character to an even length.
fn ui_padded(s: impl Into<String>) -> String {
    padded(s, '\0')
}

/// Pad with a trailing space to an even length.
fn txt_padded(s: impl Into<String>) -> String {
    padded(s, ' ')
}

impl FileMetaTableBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        FileMetaTableBuilder::default()
    }

    /// Start from the values of an existing table.
    pub fn from_table(table: &FileMetaTable) -> Self {
        FileMetaTableBuilder {
            information_version: Some(table.information_version),
            media_storage_sop_class_uid: Some(table.media_storage_sop_class_uid.clone()),
            media_storage_sop_instance_uid: Some(table.media_storage_sop_instance_uid.clone()),
            transfer_syntax: Some(table.transfer_syntax.clone()),
            implementation_class_uid: Some(table.implementation_class_uid.clone()),
            implementation_version_name: table.implementation_version_name.clone(),
            source_application_entity_title: table.source_application_entity_title.clone(),
            sending_application_entity_title: table.sending_application_entity_title.clone(),
            receiving_application_entity_title: table.receiving_application_entity_title.clone(),
            private_information_creator_uid: table.private_information_creator_uid.clone(),
            private_information: table.private_information.clone(),
        }
    }

    pub fn information_version(mut self, value: [u8; 2]) -> Self {
        self.information_version = Some(value);
        self
    }

    pub fn media_storage_sop_class_uid(mut self, value: impl Into<String>) -> Self {
        self.media_storage_sop_class_uid = Some(ui_padded(value));
        self
    }

    pub fn media_storage_sop_instance_uid(mut self, value: impl Into<String>) -> Self {
        self.media_storage_sop_instance_uid = Some(ui_padded(value));
        self
    }

    pub fn transfer_syntax(mut self, value: impl Into<String>) -> Self {
        self.transfer_syntax = Some(ui_padded(value));
        self
    }

    /// Define the implementation class UID.
    ///
    /// If not set, [`IMPLEMENTATION_CLASS_UID`](crate::IMPLEMENTATION_CLASS_UID) is used,
    /// along with [`IMPLEMENTATION_VERSION_NAME`](crate::IMPLEMENTATION_VERSION_NAME)
    /// if the version name is not set either.
    pub fn implementation_class_uid(mut self, value: impl Into<String>) -> Self {
        self.implementation_class_uid = Some(ui_padded(value));
        self
    }

    pub fn implementation_version_name(mut self, value: impl Into<String>) -> Self {
        self.implementation_version_name = Some(txt_padded(value));
        self
    }

    pub fn source_application_entity_title(mut self, value: impl Into<String>) -> Self {
        self.source_application_entity_title = Some(txt_padded(value));
        self
    }

    pub fn sending_application_entity_title(mut self, value: impl Into<String>) -> Self {
        self.sending_application_entity_title = Some(txt_padded(value));
        self
    }

    pub fn receiving_application_entity_title(mut self, value: impl Into<String>) -> Self {
        self.receiving_application_entity_title = Some(txt_padded(value));
        self
    }

    pub fn private_information_creator_uid(mut self, value: impl Into<String>) -> Self {
        self.private_information_creator_uid = Some(ui_padded(value));
        self
    }

    pub fn private_information(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.private_information = Some(value.into());
        self
    }

    /// Build the table, computing its group length.
    pub fn build(self) -> Result<FileMetaTable> {
        let media_storage_sop_class_uid =
            self.media_storage_sop_class_uid
                .context(MissingElementSnafu {
                    alias: "MediaStorageSOPClassUID",
                })?;
        let media_storage_sop_instance_uid =
            self.media_storage_sop_instance_uid
                .context(MissingElementSnafu {
                    alias: "MediaStorageSOPInstanceUID",
                })?;
        let transfer_syntax = self.transfer_syntax.context(MissingElementSnafu {
            alias: "TransferSyntax",
        })?;
        let (implementation_class_uid, implementation_version_name) =
            match self.implementation_class_uid {
                Some(uid) => (uid, self.implementation_version_name),
                None => (
                    ui_padded(crate::IMPLEMENTATION_CLASS_UID),
                    self.implementation_version_name
                        .or_else(|| Some(txt_padded(crate::IMPLEMENTATION_VERSION_NAME))),
                ),
            };

        let mut table = FileMetaTable {
            information_group_length: 0,
            information_version: self.information_version.unwrap_or([0, 1]),
            media_storage_sop_class_uid,
            media_storage_sop_instance_uid,
            transfer_syntax,
            implementation_class_uid,
            implementation_version_name,
            source_application_entity_title: self.source_application_entity_title,
            sending_application_entity_title: self.sending_application_entity_title,
            receiving_application_entity_title: self.receiving_application_entity_title,
            private_information_creator_uid: self.private_information_creator_uid,
            private_information: self.private_information,
        };
        table.update_information_group_length()?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, FileMetaTable, FileMetaTableBuilder};
    use dcmio_core::ItemSet;
    use dcmio_dictionary_std::{tags, uids};
    use pretty_assertions::assert_eq;

    /// A file meta group of 128 bytes after its group length.
    #[rustfmt::skip]
    fn meta_bytes() -> Vec<u8> {
        [
            // (0002,0000) UL, len 4, 128
            &[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 0x80, 0x00, 0x00, 0x00][..],
            // (0002,0001) OB, len 2
            &[0x02, 0x00, 0x01, 0x00, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01],
            // (0002,0002) UI, len 26
            &[0x02, 0x00, 0x02, 0x00, b'U', b'I', 0x1A, 0x00],
            b"1.2.840.10008.5.1.4.1.1.7\0",
            // (0002,0003) UI, len 12
            &[0x02, 0x00, 0x03, 0x00, b'U', b'I', 0x0C, 0x00],
            b"1.2.3.4.5.6\0",
            // (0002,0010) UI, len 20
            &[0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00],
            b"1.2.840.10008.1.2.1\0",
            // (0002,0012) UI, len 8
            &[0x02, 0x00, 0x12, 0x00, b'U', b'I', 0x08, 0x00],
            b"1.2.3.4\0",
            // (0002,0013) SH, len 8
            &[0x02, 0x00, 0x13, 0x00, b'S', b'H', 0x08, 0x00],
            b"DCMIO_03",
        ]
        .concat()
    }

    fn expected_table() -> FileMetaTable {
        FileMetaTable {
            information_group_length: 128,
            information_version: [0, 1],
            media_storage_sop_class_uid: "1.2.840.10008.5.1.4.1.1.7\0".to_owned(),
            media_storage_sop_instance_uid: "1.2.3.4.5.6\0".to_owned(),
            transfer_syntax: "1.2.840.10008.1.2.1\0".to_owned(),
            implementation_class_uid: "1.2.3.4\0".to_owned(),
            implementation_version_name: Some("DCMIO_03".to_owned()),
            source_application_entity_title: None,
            sending_application_entity_title: None,
            receiving_application_entity_title: None,
            private_information_creator_uid: None,
            private_information: None,
        }
    }

    #[test]
    fn read_meta_table_from_reader() {
        let bytes = meta_bytes();
        let table = FileMetaTable::from_reader(&bytes[..]).unwrap();
        assert_eq!(table, expected_table());
        assert_eq!(table.transfer_syntax(), uids::EXPLICIT_VR_LITTLE_ENDIAN);
        assert_eq!(
            table.media_storage_sop_class_uid(),
            uids::SECONDARY_CAPTURE_IMAGE_STORAGE
        );
        assert_eq!(table.implementation_version_name(), Some("DCMIO_03"));
    }

    #[test]
    fn reading_stops_at_the_end_of_the_group() {
        let mut bytes = meta_bytes();
        // (0008,0060) CS "OT"
        bytes.extend_from_slice(&[0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00, b'O', b'T']);
        let table = FileMetaTable::from_reader(&bytes[..]).unwrap();
        assert_eq!(table, expected_table());
    }

    #[test]
    fn create_meta_table_with_builder() {
        let table = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("1.2.3.4.5.6")
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .implementation_class_uid("1.2.3.4")
            .implementation_version_name("DCMIO_03")
            .build()
            .unwrap();
        assert_eq!(table, expected_table());
    }

    #[test]
    fn default_implementation_class() {
        let table = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("1.2.3.4.5.6")
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .build()
            .unwrap();
        assert_eq!(
            table.implementation_class_uid(),
            crate::IMPLEMENTATION_CLASS_UID
        );
        assert_eq!(
            table.implementation_version_name(),
            Some(crate::IMPLEMENTATION_VERSION_NAME)
        );
    }

    #[test]
    fn write_meta_table() {
        let mut out = Vec::new();
        expected_table().write(&mut out).unwrap();
        assert_eq!(out, meta_bytes());
    }

    #[test]
    fn group_length_follows_changes() {
        let mut table = expected_table();
        table
            .set_transfer_syntax(uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN)
            .unwrap();
        // "1.2.840.10008.1.2.1.99" is 22 bytes long, 2 more than before
        assert_eq!(table.information_group_length, 130);

        let set = table.to_item_set().unwrap();
        assert_eq!(set.int(tags::FILE_META_INFORMATION_GROUP_LENGTH), Some(130));
        assert_eq!(set.tags().next(), Some(tags::FILE_META_INFORMATION_GROUP_LENGTH));
    }

    #[test]
    fn missing_transfer_syntax() {
        let mut set = ItemSet::new();
        set.put_str(
            tags::MEDIA_STORAGE_SOP_CLASS_UID,
            dcmio_core::VR::UI,
            uids::SECONDARY_CAPTURE_IMAGE_STORAGE,
        );
        set.put_str(tags::MEDIA_STORAGE_SOP_INSTANCE_UID, dcmio_core::VR::UI, "1.2.3");
        let err = FileMetaTable::from_item_set(&set).unwrap_err();
        assert!(matches!(err, Error::MissingElement { alias: "TransferSyntax", .. }));
    }
}
