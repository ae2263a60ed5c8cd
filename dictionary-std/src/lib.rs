//! This crate implements the standard DICOM attribute dictionary and constants.
//!
//! ## Run-time dictionary
//!
//! - [`data_element`]: the [`StandardDataDictionary`],
//!   which resolves tags and keywords of standard attributes
//!   into their expected value representations.
//!   It is built once with [`StandardDataDictionary::new`]
//!   and can then be shared by any number of readers.
//!
//! ## Constants
//!
//! The following modules contain constant declarations,
//! which perform an equivalent mapping at compile time,
//! thus without incurring a look-up cost:
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
//! - [`uids`], for the transfer syntaxes and a few storage SOP classes
pub mod data_element;
pub mod tags;
pub mod uids;

pub use data_element::StandardDataDictionary;
