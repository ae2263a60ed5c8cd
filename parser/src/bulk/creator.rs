//! Creators of bulk data references.
//!
//! When the bulk data policy selects a value,
//! the reader hands the value bytes to a [`BulkDataCreator`],
//! which stores them (or not) and returns a reference to them.

use dcmio_core::value::bulk::LocatorError;
use dcmio_core::BulkData;
use snafu::{ensure, Backtrace, ResultExt, Snafu};
use std::fmt;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};
use tracing::trace;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not build bulk data URI"))]
    BuildUri {
        #[snafu(backtrace)]
        source: LocatorError,
    },
    #[snafu(display("Could not create spool file in {}", dir.display()))]
    CreateSpool {
        dir: PathBuf,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not copy value to bulk data storage"))]
    CopyValue {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Value ended after {} of {} bytes", copied, length))]
    ShortValue {
        copied: u64,
        length: u32,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not flush spool file"))]
    FlushSpool {
        source: io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Whether the value bytes ended too soon,
    /// as opposed to a failure of the bulk data storage.
    pub fn is_truncated_value(&self) -> bool {
        match self {
            Error::ShortValue { .. } => true,
            Error::CopyValue { source, .. } => source.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A strategy for externalizing attribute values.
pub trait BulkDataCreator: fmt::Debug {
    /// Create a reference to a value of `length` bytes
    /// found at `position` of the source stream.
    ///
    /// `value` yields the value bytes,
    /// all of which must be consumed.
    fn create_bulk_data(
        &mut self,
        value: &mut dyn Read,
        position: u64,
        length: u32,
        big_endian: bool,
    ) -> Result<BulkData>;

    /// Whether the references created point into the source stream itself,
    /// in which case the stream positions must be those of the source.
    fn refers_to_source(&self) -> bool {
        false
    }
}

impl<T: ?Sized> BulkDataCreator for &mut T
where
    T: BulkDataCreator,
{
    fn create_bulk_data(
        &mut self,
        value: &mut dyn Read,
        position: u64,
        length: u32,
        big_endian: bool,
    ) -> Result<BulkData> {
        (**self).create_bulk_data(value, position, length, big_endian)
    }

    fn refers_to_source(&self) -> bool {
        (**self).refers_to_source()
    }
}

/// Creates references into the source stream,
/// skipping over the value bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUriCreator {
    uri: String,
}

impl SourceUriCreator {
    /// Refer to values in the resource at the given URI.
    pub fn new(uri: impl Into<String>) -> Self {
        SourceUriCreator { uri: uri.into() }
    }

    /// Refer to values in the given local file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bulk = BulkData::from_file(path, 0, 0, false).context(BuildUriSnafu)?;
        Ok(SourceUriCreator::new(bulk.uri()))
    }

    /// The URI of the source.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl BulkDataCreator for SourceUriCreator {
    fn create_bulk_data(
        &mut self,
        value: &mut dyn Read,
        position: u64,
        length: u32,
        big_endian: bool,
    ) -> Result<BulkData> {
        let copied = io::copy(value, &mut io::sink()).context(CopyValueSnafu)?;
        ensure!(copied == u64::from(length), ShortValueSnafu { copied, length });
        Ok(BulkData::new(self.uri.clone(), position, length, big_endian))
    }

    fn refers_to_source(&self) -> bool {
        true
    }
}

/// Copies values to an append-only spool file.
///
/// The spool file is deleted when the creator is dropped,
/// unless it was handed over with [`finish`](SpoolFileCreator::finish).
#[derive(Debug)]
pub struct SpoolFileCreator {
    file: BufWriter<NamedTempFile>,
    uri: String,
    written: u64,
}

impl SpoolFileCreator {
    /// Create a spool file in the system's temporary directory.
    pub fn new() -> Result<Self> {
        Self::new_in(std::env::temp_dir())
    }

    /// Create a spool file in the given directory.
    pub fn new_in(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let file = tempfile::Builder::new()
            .prefix("blk")
            .tempfile_in(dir)
            .context(CreateSpoolSnafu { dir })?;
        let uri = BulkData::from_file(file.path(), 0, 0, false)
            .context(BuildUriSnafu)?
            .uri()
            .to_string();
        Ok(SpoolFileCreator {
            file: BufWriter::new(file),
            uri,
            written: 0,
        })
    }

    /// The path to the spool file.
    pub fn path(&self) -> &Path {
        self.file.get_ref().path()
    }

    /// The number of bytes spooled so far.
    pub fn len(&self) -> u64 {
        self.written
    }

    /// Whether nothing was spooled.
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Flush and close the spool file,
    /// handing it over to the caller.
    ///
    /// The file is deleted when the returned path is dropped.
    pub fn finish(self) -> Result<TempPath> {
        let file = self
            .file
            .into_inner()
            .map_err(|e| e.into_error())
            .context(FlushSpoolSnafu)?;
        Ok(file.into_temp_path())
    }
}

impl BulkDataCreator for SpoolFileCreator {
    fn create_bulk_data(
        &mut self,
        value: &mut dyn Read,
        _position: u64,
        length: u32,
        big_endian: bool,
    ) -> Result<BulkData> {
        let offset = self.written;
        let copied = io::copy(value, &mut self.file).context(CopyValueSnafu)?;
        self.written += copied;
        ensure!(copied == u64::from(length), ShortValueSnafu { copied, length });
        trace!("Spooled {} bytes at offset {}", length, offset);
        Ok(BulkData::new(self.uri.clone(), offset, length, big_endian))
    }
}
