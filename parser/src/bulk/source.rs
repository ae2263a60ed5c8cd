//! Sources of externalized values.
//!
//! When writing, a bulk data reference is replaced by the bytes it points to,
//! which a [`BulkDataSource`] provides.

use dcmio_core::BulkData;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};

/// Provider of the value bytes behind bulk data references.
pub trait BulkDataSource: fmt::Debug {
    /// Open the value referenced by `bulk`,
    /// yielding exactly [`length`](BulkData::length) bytes
    /// in the byte order of the reference.
    fn open(&self, bulk: &BulkData) -> io::Result<Box<dyn Read + '_>>;
}

impl<T: ?Sized> BulkDataSource for &T
where
    T: BulkDataSource,
{
    fn open(&self, bulk: &BulkData) -> io::Result<Box<dyn Read + '_>> {
        (**self).open(bulk)
    }
}

/// Resolves `file:` references in the local file system.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FileBulkDataSource;

impl BulkDataSource for FileBulkDataSource {
    fn open(&self, bulk: &BulkData) -> io::Result<Box<dyn Read + '_>> {
        let path = bulk.file_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a local file: {}", bulk.uri()),
            )
        })?;
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(bulk.offset()))?;
        Ok(Box::new(
            BufReader::new(file).take(u64::from(bulk.length())),
        ))
    }
}
