//! This module contains the concept of a DICOM data dictionary.
//!
//! A dictionary translates tags and keywords into an entry
//! describing the attribute,
//! most importantly its value representation,
//! which is needed to decode implicit VR streams.
//!
//! The standard dictionary lives in the `dcmio-dictionary-std` crate.
//! [`StubDataDictionary`] is an empty dictionary
//! for dictionary-free decoding.

mod data_element;
pub mod stub;

pub use self::data_element::{
    DataDictionary, DataDictionaryEntry, DataDictionaryEntryRef, TagRange, VirtualVr,
};
pub use self::stub::StubDataDictionary;
