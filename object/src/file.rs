//! Opening DICOM files.
use dcmio_core::{DataDictionary, ItemSet, Tag};
use dcmio_dictionary_std::StandardDataDictionary;
use dcmio_encoding::transfer_syntax::TransferSyntaxIndex;
use dcmio_parser::bulk::{BulkDataCreator, BulkDataRules, SourceUriCreator, SpoolFileCreator};
use dcmio_parser::dataset::{AttributeReader, ReadOptions};
use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dcmio_transfer_syntax_registry::resolve::{self, MAGIC, PREAMBLE_LEN, SNIFF_LEN};
use dcmio_transfer_syntax_registry::TransferSyntaxRegistry;
use snafu::{ensure, ResultExt};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::meta::FileMetaTable;
use crate::{
    CreateBulkDataSnafu, CreateParserSnafu, FileDicomObject, MissingMagicCodeSnafu,
    NoSourceUriSnafu, OpenFileSnafu, ParseMetaDataSetSnafu, ReadDataSetSnafu, ReadError,
    ReadMetaGroupSnafu, ReadPreambleBytesSnafu, ResolveDialectSnafu,
};

type Result<T, E = ReadError> = std::result::Result<T, E>;

/// Create a DICOM object by reading from a byte source.
///
/// The preamble and the magic code are detected if present.
pub fn from_reader<F>(file: F) -> Result<FileDicomObject>
where
    F: Read,
{
    OpenFileOptions::new().from_reader(file)
}

/// Create a DICOM object by reading from a file.
pub fn open_file<P>(path: P) -> Result<FileDicomObject>
where
    P: AsRef<Path>,
{
    OpenFileOptions::new().open_file(path)
}

/// Where the values selected as bulk data are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkDataHandling {
    /// Keep every value in the attribute tree.
    Inline,
    /// Refer to the values in the source,
    /// given by its URI or else by the path of the file opened.
    SourceUri(Option<String>),
    /// Copy the values to a spool file in the given directory.
    Spool(PathBuf),
}

impl Default for BulkDataHandling {
    fn default() -> Self {
        BulkDataHandling::Inline
    }
}

/// A builder type for opening a DICOM file with additional options.
///
/// # Example
///
/// ```no_run
/// # use dcmio_object::OpenFileOptions;
/// let file = OpenFileOptions::new()
///     .read_until(dcmio_dictionary_std::tags::PIXEL_DATA)
///     .open_file("path/to/file.dcm")?;
/// # Result::<(), Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct OpenFileOptions<D = StandardDataDictionary, T = TransferSyntaxRegistry> {
    data_dictionary: D,
    ts_index: T,
    read_until: Option<Tag>,
    read_preamble: ReadPreamble,
    bulk_data: BulkDataHandling,
    read_options: ReadOptions,
}

impl OpenFileOptions {
    pub fn new() -> Self {
        OpenFileOptions::default()
    }
}

impl<D, T> OpenFileOptions<D, T> {
    /// Set the operation to read only until the given tag is found.
    ///
    /// The reading process ends immediately before this tag,
    /// or any other tag after it,
    /// is found in the object's root data set.
    /// An attribute with the exact tag is excluded from the output.
    pub fn read_until(mut self, tag: Tag) -> Self {
        self.read_until = Some(tag);
        self
    }

    /// Set the operation to read all attributes of the data set to the end.
    ///
    /// This is the default behavior.
    pub fn read_all(mut self) -> Self {
        self.read_until = None;
        self
    }

    /// Set whether to read the 128-byte DICOM file preamble.
    pub fn read_preamble(mut self, option: ReadPreamble) -> Self {
        self.read_preamble = option;
        self
    }

    /// Keep all values in the attribute tree.
    ///
    /// This is the default behavior.
    pub fn inline(mut self) -> Self {
        self.bulk_data = BulkDataHandling::Inline;
        self
    }

    /// Refer to bulk data values in the file being opened,
    /// instead of reading them.
    pub fn uri(mut self) -> Self {
        self.bulk_data = BulkDataHandling::SourceUri(None);
        self
    }

    /// Refer to bulk data values in the source being read,
    /// which is available at the given URI.
    pub fn source_uri(mut self, uri: impl Into<String>) -> Self {
        self.bulk_data = BulkDataHandling::SourceUri(Some(uri.into()));
        self
    }

    /// Copy bulk data values to a spool file in the given directory.
    ///
    /// The spool file lives as long as the object read.
    pub fn spool_in(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bulk_data = BulkDataHandling::Spool(dir.into());
        self
    }

    /// Select the values to treat as bulk data.
    pub fn bulk_data_rules(mut self, rules: impl Into<Arc<BulkDataRules>>) -> Self {
        self.read_options = self.read_options.bulk_data_rules(rules);
        self
    }

    /// Replace the options of the underlying attribute reader.
    pub fn read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    /// Set the transfer syntax index to use when reading the file.
    pub fn transfer_syntax_index<Tr>(self, ts_index: Tr) -> OpenFileOptions<D, Tr>
    where
        Tr: TransferSyntaxIndex,
    {
        OpenFileOptions {
            data_dictionary: self.data_dictionary,
            ts_index,
            read_until: self.read_until,
            read_preamble: self.read_preamble,
            bulk_data: self.bulk_data,
            read_options: self.read_options,
        }
    }

    /// Set the attribute dictionary to use when reading the file.
    pub fn dictionary<Di>(self, dict: Di) -> OpenFileOptions<Di, T>
    where
        Di: DataDictionary,
        Di: Clone,
    {
        OpenFileOptions {
            data_dictionary: dict,
            ts_index: self.ts_index,
            read_until: self.read_until,
            read_preamble: self.read_preamble,
            bulk_data: self.bulk_data,
            read_options: self.read_options,
        }
    }

    /// Open the file at the given path.
    pub fn open_file<P>(self, path: P) -> Result<FileDicomObject>
    where
        P: AsRef<Path>,
        D: DataDictionary,
        D: Clone,
        T: TransferSyntaxIndex,
    {
        let path = path.as_ref();
        let file = File::open(path).context(OpenFileSnafu { filename: path })?;
        let len = file
            .metadata()
            .context(OpenFileSnafu { filename: path })?
            .len();
        let options = OpenFileOptions {
            read_options: self.read_options.clone().stream_len(len),
            ..self
        };
        options.read_object(BufReader::new(file), Some(path))
    }

    /// Obtain a DICOM object by reading from a byte source.
    pub fn from_reader<R>(self, from: R) -> Result<FileDicomObject>
    where
        R: Read,
        D: DataDictionary,
        D: Clone,
        T: TransferSyntaxIndex,
    {
        self.read_object(from, None)
    }

    fn read_object<R>(self, mut source: R, path: Option<&Path>) -> Result<FileDicomObject>
    where
        R: Read,
        D: DataDictionary,
        D: Clone,
        T: TransferSyntaxIndex,
    {
        let mut head = Vec::with_capacity(PREAMBLE_LEN + MAGIC.len());
        source
            .by_ref()
            .take((PREAMBLE_LEN + MAGIC.len()) as u64)
            .read_to_end(&mut head)
            .context(ReadPreambleBytesSnafu)?;
        let skip = match self.read_preamble {
            ReadPreamble::Auto => resolve::detect_preamble(&head),
            ReadPreamble::Always => {
                ensure!(
                    resolve::detect_preamble(&head) == PREAMBLE_LEN + MAGIC.len(),
                    MissingMagicCodeSnafu
                );
                PREAMBLE_LEN + MAGIC.len()
            }
            ReadPreamble::Never if head.starts_with(MAGIC) => MAGIC.len(),
            ReadPreamble::Never => 0,
        };
        head.drain(..skip);
        let source = Cursor::new(head).chain(source);
        let start = skip as u64;

        let parts = ObjectParts {
            dict: self.data_dictionary,
            ts_index: &self.ts_index,
            options: self.read_options,
            read_until: self.read_until,
        };
        match self.bulk_data {
            BulkDataHandling::Inline => {
                let (meta, dataset) = parts.read(source, start, None)?;
                Ok(FileDicomObject::from_parts(meta, dataset, None))
            }
            BulkDataHandling::SourceUri(uri) => {
                let mut creator = match (uri, path) {
                    (Some(uri), _) => SourceUriCreator::new(uri),
                    (None, Some(path)) => {
                        SourceUriCreator::from_file(path).context(CreateBulkDataSnafu)?
                    }
                    (None, None) => return NoSourceUriSnafu.fail(),
                };
                let (meta, dataset) = parts.read(source, start, Some(&mut creator))?;
                Ok(FileDicomObject::from_parts(meta, dataset, None))
            }
            BulkDataHandling::Spool(dir) => {
                let mut creator = SpoolFileCreator::new_in(&dir).context(CreateBulkDataSnafu)?;
                let (meta, dataset) = parts.read(source, start, Some(&mut creator))?;
                let spool = if creator.is_empty() {
                    None
                } else {
                    debug!("Spooled {} bytes to {}", creator.len(), creator.path().display());
                    Some(creator.finish().context(CreateBulkDataSnafu)?)
                };
                Ok(FileDicomObject::from_parts(meta, dataset, spool))
            }
        }
    }
}

/// What it takes to read the file meta group and the data set.
struct ObjectParts<'a, D, T> {
    dict: D,
    ts_index: &'a T,
    options: ReadOptions,
    read_until: Option<Tag>,
}

impl<D, T> ObjectParts<'_, D, T>
where
    D: DataDictionary + Clone,
    T: TransferSyntaxIndex,
{
    fn read<'s, S>(
        self,
        source: S,
        start: u64,
        creator: Option<&'s mut dyn BulkDataCreator>,
    ) -> Result<(Option<FileMetaTable>, ItemSet)>
    where
        S: Read + 's,
        D: 's,
    {
        let mut reader = AttributeReader::with_position(
            source,
            &EXPLICIT_VR_LITTLE_ENDIAN,
            self.dict.clone(),
            self.options,
            start,
        )
        .context(CreateParserSnafu)?;

        let group = reader.read_file_meta_group().context(ReadMetaGroupSnafu)?;
        let meta = if group.is_empty() {
            if start > 0 {
                warn!("Magic code found without a file meta group");
            }
            let bytes = reader.peek_bytes(SNIFF_LEN).context(ReadDataSetSnafu)?;
            let ts = resolve::sniff(&bytes, &self.dict).context(ResolveDialectSnafu)?;
            reader
                .switch_transfer_syntax(ts)
                .context(CreateParserSnafu)?;
            None
        } else {
            let meta = FileMetaTable::from_item_set(&group).context(ParseMetaDataSetSnafu)?;
            // the group length attribute itself takes 12 bytes
            let expected = start + 12 + u64::from(meta.information_group_length);
            if reader.position() != expected {
                warn!(
                    "File meta group ends at {}, but its group length says {}",
                    reader.position(),
                    expected
                );
            }
            let ts = resolve::switch(self.ts_index, meta.transfer_syntax());
            reader
                .switch_transfer_syntax(ts)
                .context(CreateParserSnafu)?;
            Some(meta)
        };

        if let Some(creator) = creator {
            reader = reader.with_bulk_data_creator(creator);
        }
        let read_until = self.read_until;
        let dataset = reader
            .read_dataset(|header| read_until.map_or(false, |tag| header.tag >= tag))
            .context(ReadDataSetSnafu)?;
        Ok((meta, dataset))
    }
}

/// An enumerate of supported options for
/// whether to read the 128-byte DICOM file preamble.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ReadPreamble {
    /// Skip the preamble and the magic code if they are there.
    Auto,
    /// Never read the preamble,
    /// thus assuming that the source does not have it.
    /// A leading magic code is still skipped.
    Never,
    /// Always read the preamble and the magic code,
    /// failing if the source does not have them.
    Always,
}

impl Default for ReadPreamble {
    fn default() -> Self {
        ReadPreamble::Auto
    }
}

#[cfg(test)]
mod tests {
    use super::{BulkDataHandling, OpenFileOptions, ReadPreamble};
    use crate::ReadError;

    #[test]
    fn default_options() {
        let options = OpenFileOptions::new();
        assert_eq!(options.read_preamble, ReadPreamble::Auto);
        assert_eq!(options.bulk_data, BulkDataHandling::Inline);
        assert_eq!(options.read_until, None);
    }

    #[test]
    fn source_uri_needs_a_location() {
        let bytes: &[u8] = &[0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x05, 0x00];
        let err = OpenFileOptions::new().uri().from_reader(bytes).unwrap_err();
        assert!(matches!(err, ReadError::NoSourceUri { .. }));
    }

    #[test]
    fn always_requires_a_preamble() {
        let bytes: &[u8] = b"DICM";
        let err = OpenFileOptions::new()
            .read_preamble(ReadPreamble::Always)
            .from_reader(bytes)
            .unwrap_err();
        assert!(matches!(err, ReadError::MissingMagicCode { .. }));
    }
}
