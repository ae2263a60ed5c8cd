#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of dcmio, containing the data structures
//! shared by the DICOM stream reader and writer.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises the data types of an attribute header,
//!   including DICOM tags, value representations and value lengths.
//! - [`dictionary`] describes the behavior of DICOM data dictionaries,
//!   which translate attribute tags and keywords
//!   into the value representation expected for them.
//! - [`value`] holds the values of attributes:
//!   raw bytes, sequences of items, fragments and bulk data references.
//! - [`item_set`] defines the attribute tree itself,
//!   an ordered set of attributes keyed by tag.
//!
//! [`dictionary`]: ./dictionary/index.html
//! [`header`]: ./header/index.html
//! [`item_set`]: ./item_set/index.html
//! [`value`]: ./value/index.html

pub mod dictionary;
pub mod header;
pub mod item_set;
pub mod value;

pub use dictionary::DataDictionary;
pub use header::{DataElementHeader, Length, Tag, VR};
pub use item_set::{Attribute, ItemPointer, ItemSet};
pub use value::{BulkData, Fragment, Fragments, Sequence, Value};

// re-export crates that are part of the public API
pub use smallvec;
