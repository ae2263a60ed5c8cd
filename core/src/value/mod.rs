//! This module includes the representation of attribute values.
//!
//! Values are kept in their encoded form:
//! primitive values are owned byte buffers
//! in the byte order of the item set holding them.
//! Only the framing of nested content is modeled,
//! through [`Sequence`] and [`Fragments`],
//! plus externalized values through [`BulkData`].

use crate::header::{Length, VR};
use crate::item_set::ItemSet;
use smallvec::SmallVec;

pub mod bulk;
mod fragments;
pub mod num;

pub use self::bulk::{BulkData, LocatorError};
pub use self::fragments::{Fragment, Fragments};

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An empty value (zero length, empty sequence or no fragments).
    Empty,
    /// The raw bytes of a primitive value.
    Bytes(Vec<u8>),
    /// A sequence of items.
    Sequence(Sequence),
    /// A list of fragments in an undefined length value.
    Fragments(Fragments),
    /// A reference to a value held outside of the tree.
    BulkData(BulkData),
}

impl Value {
    /// Whether this is the empty value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Retrieve the raw bytes of a primitive value.
    ///
    /// Returns an empty slice for [`Value::Empty`]
    /// and `None` for any other kind of value.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Empty => Some(&[]),
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Retrieve the items of a sequence value.
    pub fn items(&self) -> Option<&[ItemSet]> {
        match self {
            Value::Sequence(seq) => Some(seq.items()),
            _ => None,
        }
    }

    /// Retrieve the sequence value.
    pub fn sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Retrieve a mutable reference to the sequence value.
    pub fn sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Retrieve the fragments of an undefined length value.
    pub fn fragments(&self) -> Option<&Fragments> {
        match self {
            Value::Fragments(f) => Some(f),
            _ => None,
        }
    }

    /// Retrieve the bulk data reference.
    pub fn bulk_data(&self) -> Option<&BulkData> {
        match self {
            Value::BulkData(b) => Some(b),
            _ => None,
        }
    }

    /// Copy this value into the given byte order.
    ///
    /// `big_endian` is the byte order of the current value
    /// and `vr` is the value representation of the attribute.
    /// Bulk data references are kept as is,
    /// since they record their own byte order.
    pub fn to_byte_order(&self, vr: VR, big_endian: bool, target_big_endian: bool) -> Value {
        if big_endian == target_big_endian {
            return self.clone();
        }
        match self {
            Value::Bytes(bytes) => Value::Bytes(num::swap_bytes(bytes, vr.swap_unit())),
            Value::Sequence(seq) => Value::Sequence(Sequence {
                items: seq
                    .items
                    .iter()
                    .map(|item| item.to_byte_order(target_big_endian))
                    .collect(),
                length: seq.length,
            }),
            Value::Fragments(fragments) => Value::Fragments(
                fragments.to_byte_order(vr, big_endian, target_big_endian),
            ),
            other => other.clone(),
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            Value::Empty
        } else {
            Value::Bytes(bytes)
        }
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        if seq.is_empty() {
            Value::Empty
        } else {
            Value::Sequence(seq)
        }
    }
}

impl From<Fragments> for Value {
    fn from(fragments: Fragments) -> Self {
        if fragments.is_empty() {
            Value::Empty
        } else {
            Value::Fragments(fragments)
        }
    }
}

impl From<BulkData> for Value {
    fn from(bulk: BulkData) -> Self {
        Value::BulkData(bulk)
    }
}

/// A sequence of items,
/// the value of an attribute with the `SQ` value representation.
///
/// Two sequences are equal if they hold equal items,
/// regardless of the length they were decoded with.
#[derive(Debug, Clone)]
pub struct Sequence {
    items: C<ItemSet>,
    length: Length,
}

impl Sequence {
    /// Create an empty sequence with an undefined length.
    pub fn new() -> Self {
        Sequence {
            items: C::new(),
            length: Length::UNDEFINED,
        }
    }

    /// Create an empty sequence,
    /// recording the length declared in the stream.
    pub fn with_length(length: Length) -> Self {
        Sequence {
            items: C::new(),
            length,
        }
    }

    /// The length declared when this sequence was decoded,
    /// undefined for sequences created programmatically.
    pub fn length(&self) -> Length {
        self.length
    }

    /// The items of the sequence.
    pub fn items(&self) -> &[ItemSet] {
        &self.items
    }

    /// Mutable access to the items of the sequence.
    pub fn items_mut(&mut self) -> &mut C<ItemSet> {
        &mut self.items
    }

    /// Append an item to the sequence.
    pub fn push(&mut self, item: ItemSet) {
        self.items.push(item);
    }

    /// The number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence::new()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Vec<ItemSet>> for Sequence {
    fn from(items: Vec<ItemSet>) -> Self {
        Sequence {
            items: C::from_vec(items),
            length: Length::UNDEFINED,
        }
    }
}
