#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! This crate contains the DICOM transfer syntax registry.
//!
//! The transfer syntax registry maps a DICOM UID of a transfer syntax into the
//! respective transfer syntax specifier.
//! Unlike a global registry, a [`TransferSyntaxRegistry`]
//! is constructed explicitly and handed to whoever needs it.
//!
//! The [`resolve`] module guesses or switches
//! the encoding dialect of a stream,
//! and [`deflate`] implements the data set adapter
//! of _Deflated Explicit VR Little Endian_.
//!
//! ```
//! # use dcmio_encoding::TransferSyntaxIndex;
//! # use dcmio_transfer_syntax_registry::TransferSyntaxRegistry;
//! let registry = TransferSyntaxRegistry::new();
//! let ts = registry.get("1.2.840.10008.1.2.1").unwrap();
//! assert_eq!(ts.name(), "Explicit VR Little Endian");
//! ```

pub mod deflate;
pub mod entries;
pub mod resolve;

use dcmio_encoding::transfer_syntax::{Codec, TransferSyntax, TransferSyntaxIndex};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Data type for a registry of DICOM transfer syntaxes.
#[derive(Clone)]
pub struct TransferSyntaxRegistry {
    m: HashMap<&'static str, TransferSyntax>,
}

impl fmt::Debug for TransferSyntaxRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: HashMap<&str, &str> =
            self.m.iter().map(|(uid, ts)| (*uid, ts.name())).collect();
        f.debug_struct("TransferSyntaxRegistry")
            .field("m", &entries)
            .finish()
    }
}

impl Default for TransferSyntaxRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferSyntaxRegistry {
    /// Create a registry with all transfer syntaxes known to this crate.
    pub fn new() -> Self {
        let mut registry = TransferSyntaxRegistry {
            m: HashMap::with_capacity(entries::ALL.len()),
        };
        for ts in entries::ALL {
            registry.register(*ts);
        }
        registry
    }

    /// Create a registry without any transfer syntaxes.
    pub fn empty() -> Self {
        TransferSyntaxRegistry { m: HashMap::new() }
    }

    /// Obtain a DICOM transfer syntax by its UID.
    ///
    /// A trailing null character in `uid` is ignored.
    pub fn get<U: AsRef<str>>(&self, uid: U) -> Option<&TransferSyntax> {
        let uid = uid.as_ref();
        self.m.get(uid.trim_end_matches('\0'))
    }

    /// Register the given transfer syntax (TS).
    ///
    /// A TS with the same UID is only replaced
    /// if the new one adds a data set adapter
    /// which the previous one did not have.
    /// Returns whether the TS was registered.
    pub fn register(&mut self, ts: TransferSyntax) -> bool {
        match self.m.entry(ts.uid()) {
            Entry::Occupied(mut e) => {
                let replace = matches!(
                    (e.get().codec(), ts.codec()),
                    (Codec::None, Codec::Dataset(_))
                        | (Codec::EncapsulatedPixelData, Codec::Dataset(_))
                );
                if replace {
                    e.insert(ts);
                }
                replace
            }
            Entry::Vacant(e) => {
                e.insert(ts);
                true
            }
        }
    }

    /// Iterate over all registered transfer syntaxes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        self.m.values()
    }

    /// The number of registered transfer syntaxes.
    pub fn len(&self) -> usize {
        self.m.len()
    }

    /// Whether no transfer syntax is registered.
    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        TransferSyntaxRegistry::get(self, uid)
    }
}

/// Retrieve the default transfer syntax.
pub fn default() -> TransferSyntax {
    entries::IMPLICIT_VR_LITTLE_ENDIAN
}
