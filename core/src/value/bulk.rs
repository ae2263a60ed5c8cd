//! References to values kept outside of the attribute tree.
//!
//! A bulk data reference is located by a URI,
//! optionally followed by `offset` and `length` query parameters
//! delimiting the value within the referenced resource:
//!
//! ```text
//! file:///tmp/blk7QnVx?offset=1024&length=65536
//! ```

use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// An error in a bulk data locator.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum LocatorError {
    /// the locator is not a valid URI
    #[snafu(display("invalid bulk data URI `{}`", locator))]
    InvalidUri {
        locator: String,
        source: url::ParseError,
        backtrace: Backtrace,
    },
    /// a locator parameter is not a number
    #[snafu(display("invalid `{}` parameter in bulk data URI `{}`", name, locator))]
    InvalidParameter {
        name: &'static str,
        locator: String,
        source: std::num::ParseIntError,
        backtrace: Backtrace,
    },
    /// the locator does not declare the value length
    #[snafu(display("missing `length` parameter in bulk data URI `{}`", locator))]
    MissingLength {
        locator: String,
        backtrace: Backtrace,
    },
    /// the path cannot be expressed as a file URI
    #[snafu(display("cannot build a file URI from {}", path.display()))]
    NotAbsolute { path: PathBuf, backtrace: Backtrace },
    /// a relative path could not be resolved
    #[snafu(display("cannot resolve relative path {}", path.display()))]
    CurrentDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// A reference to a value held in external storage.
///
/// The reference does not own the bytes it points to:
/// the referenced resource must outlive any use of this reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BulkData {
    uri: String,
    offset: u64,
    length: u32,
    big_endian: bool,
}

impl BulkData {
    /// Create a bulk data reference to the `length` bytes at `offset`
    /// of the resource at `uri`.
    ///
    /// `big_endian` is the byte order of the referenced value.
    pub fn new(uri: impl Into<String>, offset: u64, length: u32, big_endian: bool) -> Self {
        BulkData {
            uri: uri.into(),
            offset,
            length,
            big_endian,
        }
    }

    /// Create a bulk data reference into a local file.
    ///
    /// A relative path is taken from the current working directory.
    pub fn from_file(
        path: impl AsRef<Path>,
        offset: u64,
        length: u32,
        big_endian: bool,
    ) -> Result<Self, LocatorError> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .context(CurrentDirSnafu { path })?
                .join(path)
        };
        let url = Url::from_file_path(&path)
            .ok()
            .context(NotAbsoluteSnafu { path: &path })?;
        Ok(BulkData::new(url.as_str(), offset, length, big_endian))
    }

    /// Parse a full locator of the form `uri?offset=N&length=N`.
    ///
    /// The offset defaults to 0 when absent.
    /// Any other query parameters are kept in the URI.
    pub fn parse(locator: &str, big_endian: bool) -> Result<Self, LocatorError> {
        let mut url = Url::parse(locator).context(InvalidUriSnafu { locator })?;
        let mut offset = 0;
        let mut length = None;
        let mut rest = Vec::new();
        for (k, v) in url.query_pairs() {
            match &*k {
                "offset" => {
                    offset = v.parse().context(InvalidParameterSnafu {
                        name: "offset",
                        locator,
                    })?;
                }
                "length" => {
                    length = Some(v.parse().context(InvalidParameterSnafu {
                        name: "length",
                        locator,
                    })?);
                }
                _ => rest.push((k.into_owned(), v.into_owned())),
            }
        }
        let length = length.context(MissingLengthSnafu { locator })?;

        if rest.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(rest);
        }

        Ok(BulkData::new(url.as_str(), offset, length, big_endian))
    }

    /// The URI of the resource holding the value, without offset and length.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The position of the value in the resource, in bytes.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The length of the value in bytes.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Whether the referenced value is encoded in big endian.
    pub fn is_big_endian(&self) -> bool {
        self.big_endian
    }

    /// The full locator, with offset and length parameters.
    pub fn locator(&self) -> String {
        let sep = if self.uri.contains('?') { '&' } else { '?' };
        format!(
            "{}{}offset={}&length={}",
            self.uri, sep, self.offset, self.length
        )
    }

    /// The local path of the resource,
    /// if it is referenced through a `file` URI.
    pub fn file_path(&self) -> Option<PathBuf> {
        let url = Url::parse(&self.uri).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }
}

impl fmt::Display for BulkData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locator())
    }
}

#[cfg(test)]
mod tests {
    use super::BulkData;

    #[test]
    fn locator_with_offset_and_length() {
        let bulk = BulkData::new("file:///data/image.dcm", 1024, 512, false);
        assert_eq!(
            bulk.locator(),
            "file:///data/image.dcm?offset=1024&length=512"
        );

        let parsed = BulkData::parse(&bulk.locator(), false).unwrap();
        assert_eq!(parsed, bulk);
    }

    #[test]
    fn locator_keeps_other_parameters() {
        let bulk = BulkData::parse("http://host/blob?id=7&length=10", true).unwrap();
        assert_eq!(bulk.uri(), "http://host/blob?id=7");
        assert_eq!(bulk.offset(), 0);
        assert_eq!(bulk.length(), 10);
        assert!(bulk.is_big_endian());
        assert_eq!(bulk.locator(), "http://host/blob?id=7&offset=0&length=10");
    }

    #[test]
    fn locator_errors() {
        assert!(BulkData::parse("not a uri", false).is_err());
        assert!(BulkData::parse("file:///a?length=ten", false).is_err());
        assert!(BulkData::parse("file:///a?offset=3", false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn file_uris() {
        let bulk = BulkData::from_file("/tmp/spool.blk", 8, 2, false).unwrap();
        assert_eq!(bulk.uri(), "file:///tmp/spool.blk");
        assert_eq!(bulk.file_path(), Some("/tmp/spool.blk".into()));

        let bulk = BulkData::from_file("relative/spool.blk", 0, 0, false).unwrap();
        let expected = std::env::current_dir().unwrap().join("relative/spool.blk");
        assert_eq!(bulk.file_path(), Some(expected));
        assert_eq!(BulkData::new("http://host/x", 0, 0, false).file_path(), None);
    }
}
