#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]

//! This crate provides the stream reader and writer of dcmio,
//! turning DICOM data sets in any of the supported transfer syntaxes
//! into attribute trees and back.
//!
//! - [`source`] is a byte source with look-ahead and rewinding,
//!   used to sniff dialects and to recover from damaged sequences.
//! - [`stateful`] pairs a transfer syntax with a source or sink,
//!   decoding and encoding headers and raw values.
//! - [`dataset`] holds the [`AttributeReader`] and [`AttributeWriter`],
//!   which walk whole data sets.
//! - [`bulk`] decides which values are bulk data
//!   and how they are externalized and resolved again.
//!
//! For the time being, all APIs are based on synchronous I/O.
//!
//! [`AttributeReader`]: dataset::AttributeReader
//! [`AttributeWriter`]: dataset::AttributeWriter

pub mod bulk;
pub mod dataset;
pub mod source;
pub mod stateful;

pub use bulk::{BulkDataCreator, BulkDataRules, BulkDataSource};
pub use dataset::{AttributeReader, AttributeWriter, ReadOptions, WriteOptions};
pub use stateful::decode::StatefulDecoder;
pub use stateful::encode::StatefulEncoder;
