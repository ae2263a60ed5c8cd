#![allow(clippy::derive_partial_eq_without_eq)]
//! This crate contains a high-level abstraction for reading and writing
//! DICOM files as attribute trees.
//!
//! Loading a DICOM file can be done with ease via the function [`open_file`].
//! For additional file reading options, use [`OpenFileOptions`].
//!
//! # Examples
//!
//! Read an object and fetch some attributes:
//!
//! ```no_run
//! use dcmio_dictionary_std::tags;
//! use dcmio_object::open_file;
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let obj = open_file("0001.dcm")?;
//!
//! let patient_id = obj.string(tags::PATIENT_ID);
//! let rows = obj.int(tags::ROWS);
//! # Ok(())
//! # }
//! ```
//!
//! By default, the entire data set is loaded into memory.
//! The pixel data and following attributes can be ignored,
//! and large values can be kept out of memory:
//!
//! ```no_run
//! use dcmio_object::OpenFileOptions;
//!
//! let obj = OpenFileOptions::new()
//!     .read_until(dcmio_dictionary_std::tags::PIXEL_DATA)
//!     .open_file("0002.dcm")?;
//!
//! let obj = OpenFileOptions::new()
//!     .spool_in(std::env::temp_dir())
//!     .open_file("0003.dcm")?;
//! # Result::<(), dcmio_object::ReadError>::Ok(())
//! ```
//!
//! Objects are written back with their preamble, magic code and file meta group.
//! When creating a new object from scratch,
//! use a [`FileMetaTableBuilder`] to construct the file meta group:
//!
//! ```no_run
//! # use dcmio_core::{ItemSet, VR};
//! # use dcmio_object::{FileDicomObject, FileMetaTableBuilder};
//! # fn something() -> Result<(), Box<dyn std::error::Error>> {
//! use dcmio_dictionary_std::{tags, uids};
//!
//! let mut dataset = ItemSet::new();
//! dataset.put_str(tags::PATIENT_ID, VR::LO, "12345");
//! let meta = FileMetaTableBuilder::new()
//!     .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
//!     .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
//!     .media_storage_sop_instance_uid("2.25.1")
//!     .build()?;
//! FileDicomObject::new(meta, dataset).write_to_file("0001_new.dcm")?;
//! # Ok(())
//! # }
//! ```
pub mod file;
pub mod meta;

pub use crate::file::{from_reader, open_file, BulkDataHandling, OpenFileOptions, ReadPreamble};
pub use crate::meta::{FileMetaTable, FileMetaTableBuilder};
pub use dcmio_core::Tag;
pub use dcmio_dictionary_std::StandardDataDictionary;

use dcmio_core::ItemSet;
use dcmio_parser::dataset::{self, AttributeWriter, ErrorKind, WriteOptions};
use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dcmio_transfer_syntax_registry::resolve::{MAGIC, PREAMBLE_LEN};
use dcmio_transfer_syntax_registry::TransferSyntaxRegistry;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempPath;

/// The implementation class UID referring to this library.
pub const IMPLEMENTATION_CLASS_UID: &str = "2.25.262231845283958094412468432939614729937";

/// The implementation version name referring to this library.
pub const IMPLEMENTATION_VERSION_NAME: &str = "DCMIO 0.3";

/// An error which may occur when loading a DICOM object
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum ReadError {
    #[snafu(display("Could not open file '{}'", filename.display()))]
    OpenFile {
        filename: std::path::PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    /// Could not read preamble bytes
    ReadPreambleBytes {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Missing preamble and magic code"))]
    MissingMagicCode { backtrace: Backtrace },
    #[snafu(display("Could not create data set parser"))]
    CreateParser {
        #[snafu(backtrace)]
        source: dataset::read::Error,
    },
    #[snafu(display("Could not read file meta group"))]
    ReadMetaGroup {
        #[snafu(backtrace)]
        source: dataset::read::Error,
    },
    #[snafu(display("Could not parse meta group data set"))]
    ParseMetaDataSet {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    #[snafu(display("Could not resolve the encoding of the data set"))]
    ResolveDialect {
        #[snafu(backtrace)]
        source: dcmio_transfer_syntax_registry::resolve::Error,
    },
    #[snafu(display("Could not read data set"))]
    ReadDataSet {
        #[snafu(backtrace)]
        source: dataset::read::Error,
    },
    #[snafu(display("Could not set up bulk data storage"))]
    CreateBulkData {
        #[snafu(backtrace)]
        source: dcmio_parser::bulk::creator::Error,
    },
    #[snafu(display("No URI to refer to values of a byte source"))]
    NoSourceUri { backtrace: Backtrace },
}

impl ReadError {
    /// The classification of the underlying attribute reading error,
    /// if that is what failed.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ReadError::CreateParser { source }
            | ReadError::ReadMetaGroup { source }
            | ReadError::ReadDataSet { source } => Some(source.kind()),
            _ => None,
        }
    }
}

/// An error which may occur when writing a DICOM object
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WriteError {
    #[snafu(display("Could not write to file '{}'", filename.display()))]
    WriteFile {
        filename: std::path::PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write object preamble"))]
    WritePreamble {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write magic code"))]
    WriteMagicCode {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Object has no file meta group"))]
    MissingMeta { backtrace: Backtrace },
    #[snafu(display("Could not prepare file meta group"))]
    PrepareMetaTable {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    #[snafu(display("Could not create data set printer"))]
    CreatePrinter {
        #[snafu(backtrace)]
        source: dataset::write::Error,
    },
    #[snafu(display("Could not print meta group data set"))]
    PrintMetaDataSet {
        #[snafu(backtrace)]
        source: dataset::write::Error,
    },
    #[snafu(display("Could not print data set"))]
    PrintDataSet {
        #[snafu(backtrace)]
        source: dataset::write::Error,
    },
    #[snafu(display("Could not flush output"))]
    FlushOutput {
        backtrace: Backtrace,
        source: std::io::Error,
    },
}

/// A root DICOM object retrieved from a DICOM file,
/// containing the information from the file meta group
/// in a separate table value.
///
/// The object dereferences to its data set.
/// A spool file holding its bulk data, if any,
/// is removed when the object and all its clones are dropped.
#[derive(Debug, Clone)]
pub struct FileDicomObject {
    meta: Option<FileMetaTable>,
    dataset: ItemSet,
    spool: Option<Arc<TempPath>>,
}

impl PartialEq for FileDicomObject {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta && self.dataset == other.dataset
    }
}

impl FileDicomObject {
    /// Create an object out of its file meta table and its data set.
    pub fn new(meta: FileMetaTable, dataset: ItemSet) -> Self {
        FileDicomObject::from_parts(Some(meta), dataset, None)
    }

    /// Create an object without a file meta group,
    /// as read from a bare data set.
    pub fn without_meta(dataset: ItemSet) -> Self {
        FileDicomObject::from_parts(None, dataset, None)
    }

    pub(crate) fn from_parts(
        meta: Option<FileMetaTable>,
        dataset: ItemSet,
        spool: Option<TempPath>,
    ) -> Self {
        FileDicomObject {
            meta,
            dataset,
            spool: spool.map(Arc::new),
        }
    }

    /// Retrieve the processed meta header table,
    /// if the object was read with one.
    pub fn meta(&self) -> Option<&FileMetaTable> {
        self.meta.as_ref()
    }

    /// Retrieve a mutable reference to the processed meta header table.
    ///
    /// Considerable care should be taken when modifying this table,
    /// as it defines how the data set is written.
    pub fn meta_mut(&mut self) -> Option<&mut FileMetaTable> {
        self.meta.as_mut()
    }

    /// Replace the file meta table.
    pub fn set_meta(&mut self, meta: FileMetaTable) {
        self.meta = Some(meta);
    }

    pub fn dataset(&self) -> &ItemSet {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut ItemSet {
        &mut self.dataset
    }

    /// Retrieve the data set, discarding the meta table.
    ///
    /// Bulk data references into a spool file
    /// become dangling once the spool file is gone,
    /// so this leaves the spool file on disk for the caller to remove.
    pub fn into_dataset(self) -> ItemSet {
        if let Some(spool) = self.spool {
            if let Ok(spool) = Arc::try_unwrap(spool) {
                // dropping the path would delete the file
                let _ = spool.keep();
            }
        }
        self.dataset
    }

    /// The path to the spool file holding the bulk data of this object.
    pub fn spool_path(&self) -> Option<&Path> {
        self.spool.as_deref().map(|p| &**p)
    }

    /// Write the entire object as a DICOM file
    /// into the given file path.
    /// Preamble, magic code, and file meta group will be included
    /// before the data set.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteError> {
        let path = path.as_ref();
        let file = File::create(path).context(WriteFileSnafu { filename: path })?;
        self.write_all(BufWriter::new(file))
    }

    /// Write the entire object as a DICOM file
    /// into the given writer.
    /// Preamble, magic code, and file meta group will be included
    /// before the data set.
    ///
    /// Sequences and items are written with undefined lengths.
    pub fn write_all<W: Write>(&self, to: W) -> Result<(), WriteError> {
        self.write_all_with(to, WriteOptions::default())
    }

    /// Write the entire object as a DICOM file
    /// with the given writing options.
    pub fn write_all_with<W: Write>(&self, mut to: W, options: WriteOptions) -> Result<(), WriteError> {
        let meta = self.meta.as_ref().context(MissingMetaSnafu)?;
        let group = meta.to_item_set().context(PrepareMetaTableSnafu)?;

        to.write_all(&[0_u8; PREAMBLE_LEN][..])
            .context(WritePreambleSnafu)?;
        to.write_all(MAGIC).context(WriteMagicCodeSnafu)?;

        let mut writer = AttributeWriter::new(&mut to, &EXPLICIT_VR_LITTLE_ENDIAN, options)
            .context(CreatePrinterSnafu)?;
        writer
            .write_dataset(&group)
            .context(PrintMetaDataSetSnafu)?;

        let registry = TransferSyntaxRegistry::new();
        let ts = registry.get_or_default(meta.transfer_syntax());
        writer
            .switch_transfer_syntax(ts)
            .context(CreatePrinterSnafu)?;
        writer
            .write_dataset(&self.dataset)
            .context(PrintDataSetSnafu)?;
        writer.finish().context(PrintDataSetSnafu)?;
        to.flush().context(FlushOutputSnafu)
    }

    /// Write the file meta group into the given writer.
    ///
    /// This is equivalent to `self.meta().write(to)`.
    pub fn write_meta<W: Write>(&self, to: W) -> Result<(), WriteError> {
        let meta = self.meta.as_ref().context(MissingMetaSnafu)?;
        meta.write(to).context(PrepareMetaTableSnafu)
    }

    /// Write the data set into the given writer,
    /// without preamble, magic code, nor file meta group.
    ///
    /// The transfer syntax is selected from the file meta table.
    pub fn write_dataset<W: Write>(&self, mut to: W) -> Result<(), WriteError> {
        let meta = self.meta.as_ref().context(MissingMetaSnafu)?;
        let registry = TransferSyntaxRegistry::new();
        let ts = registry.get_or_default(meta.transfer_syntax());
        let mut writer = AttributeWriter::new(&mut to, ts, WriteOptions::default())
            .context(CreatePrinterSnafu)?;
        writer
            .write_dataset(&self.dataset)
            .context(PrintDataSetSnafu)?;
        writer.finish().context(PrintDataSetSnafu)?;
        to.flush().context(FlushOutputSnafu)
    }
}

impl ::std::ops::Deref for FileDicomObject {
    type Target = ItemSet;

    fn deref(&self) -> &Self::Target {
        &self.dataset
    }
}

impl ::std::ops::DerefMut for FileDicomObject {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.dataset
    }
}
