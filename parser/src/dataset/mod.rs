//! Reading and writing whole data sets.
//!
//! - [`read`] holds the [`AttributeReader`],
//!   which decodes a stream into an item set;
//! - [`consumer`] holds the [`ValueConsumer`] callbacks
//!   through which the reader hands over each value;
//! - [`write`] holds the [`AttributeWriter`],
//!   which encodes item sets back into a stream.

pub mod consumer;
pub mod read;
pub mod write;

pub use self::consumer::{DumpConsumer, TreeBuilder, ValueConsumer};
pub use self::read::{AttributeHeader, AttributeReader, ErrorKind, ReadOptions};
pub use self::write::{AttributeWriter, LengthEncoding, WriteOptions};
