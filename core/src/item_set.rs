//! The in-memory attribute tree.
//!
//! An [`ItemSet`] is either a whole data set
//! or one item of a sequence.
//! It keeps its attributes in insertion order,
//! with at most one attribute per tag.

use crate::header::{HasLength, Length, Tag, VR};
use crate::value::{num, BulkData, Fragments, Sequence, Value};
use std::fmt;

/// A single attribute: a tag, a value representation and a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    tag: Tag,
    vr: VR,
    value: Value,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(tag: Tag, vr: VR, value: impl Into<Value>) -> Self {
        Attribute {
            tag,
            vr,
            value: value.into(),
        }
    }

    /// Create an attribute with an empty value.
    pub fn empty(tag: Tag, vr: VR) -> Self {
        Attribute {
            tag,
            vr,
            value: Value::Empty,
        }
    }

    /// The attribute's tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The attribute's value representation.
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The attribute's value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Mutable access to the attribute's value.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Take the value out of the attribute.
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// An ordered, tag-unique collection of attributes.
///
/// Each item set records the byte order of its primitive values,
/// which is fixed at creation.
/// Use [`to_byte_order`](ItemSet::to_byte_order)
/// to obtain a copy in another byte order.
#[derive(Clone)]
pub struct ItemSet {
    attributes: Vec<Attribute>,
    /// whether the attributes are in strictly ascending tag order
    ascending: bool,
    big_endian: bool,
    length: Length,
}

impl ItemSet {
    /// Create an empty item set holding little endian values.
    pub fn new() -> Self {
        ItemSet::with_byte_order(false)
    }

    /// Create an empty item set holding values in the given byte order.
    pub fn with_byte_order(big_endian: bool) -> Self {
        ItemSet {
            attributes: Vec::new(),
            ascending: true,
            big_endian,
            length: Length::UNDEFINED,
        }
    }

    /// Create an empty item set,
    /// recording the length of the item being decoded.
    pub fn with_length(big_endian: bool, length: Length) -> Self {
        ItemSet {
            attributes: Vec::new(),
            ascending: true,
            big_endian,
            length,
        }
    }

    /// Whether the primitive values in this set are big endian.
    pub fn is_big_endian(&self) -> bool {
        self.big_endian
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the set has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// The tags of all attributes in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.attributes.iter().map(|a| a.tag)
    }

    fn position(&self, tag: Tag) -> Option<usize> {
        self.attributes.iter().rposition(|a| a.tag == tag)
    }

    /// Insert an attribute.
    ///
    /// If an attribute with the same tag exists,
    /// it is replaced in place and returned.
    /// Otherwise the attribute is appended at the end.
    pub fn put(&mut self, attribute: Attribute) -> Option<Attribute> {
        let after_last = self
            .attributes
            .last()
            .map_or(true, |last| last.tag < attribute.tag);
        // a sorted set cannot hold a tag greater than its last one
        if self.ascending && after_last {
            self.attributes.push(attribute);
            return None;
        }
        match self.position(attribute.tag) {
            Some(i) => Some(std::mem::replace(&mut self.attributes[i], attribute)),
            None => {
                self.ascending &= after_last;
                self.attributes.push(attribute);
                None
            }
        }
    }

    /// Insert an attribute with the given raw bytes.
    pub fn put_bytes(&mut self, tag: Tag, vr: VR, bytes: impl Into<Vec<u8>>) -> Option<Attribute> {
        self.put(Attribute::new(tag, vr, bytes.into()))
    }

    /// Insert an attribute with an empty value.
    pub fn put_empty(&mut self, tag: Tag, vr: VR) -> Option<Attribute> {
        self.put(Attribute::empty(tag, vr))
    }

    /// Insert a textual attribute with one or more components,
    /// padded to an even length.
    pub fn put_strings<S: AsRef<str>>(&mut self, tag: Tag, vr: VR, values: &[S]) -> Option<Attribute> {
        self.put(Attribute::new(tag, vr, num::write_strings(vr, values)))
    }

    /// Insert a textual attribute with a single component,
    /// padded to an even length.
    pub fn put_str(&mut self, tag: Tag, vr: VR, value: &str) -> Option<Attribute> {
        self.put_strings(tag, vr, &[value])
    }

    /// Insert an integer attribute encoded in this set's byte order.
    ///
    /// Returns `false` without inserting anything
    /// if the representation cannot hold integers.
    pub fn put_ints(&mut self, tag: Tag, vr: VR, values: &[i64]) -> bool {
        match num::write_ints(vr, values, self.big_endian) {
            Some(bytes) => {
                self.put(Attribute::new(tag, vr, bytes));
                true
            }
            None => false,
        }
    }

    /// Insert a floating point attribute encoded in this set's byte order.
    ///
    /// Returns `false` without inserting anything
    /// if the representation cannot hold floating point numbers.
    pub fn put_floats(&mut self, tag: Tag, vr: VR, values: &[f64]) -> bool {
        match num::write_floats(vr, values, self.big_endian) {
            Some(bytes) => {
                self.put(Attribute::new(tag, vr, bytes));
                true
            }
            None => false,
        }
    }

    /// Insert a sequence attribute with the given items.
    ///
    /// An empty list of items yields an empty attribute.
    pub fn put_sequence(&mut self, tag: Tag, items: Vec<ItemSet>) -> Option<Attribute> {
        self.put(Attribute::new(tag, VR::SQ, Sequence::from(items)))
    }

    /// Insert a fragmented attribute.
    pub fn put_fragments(&mut self, tag: Tag, vr: VR, fragments: Fragments) -> Option<Attribute> {
        self.put(Attribute::new(tag, vr, fragments))
    }

    /// Insert an attribute referencing bulk data.
    pub fn put_bulk_data(&mut self, tag: Tag, vr: VR, bulk: BulkData) -> Option<Attribute> {
        self.put(Attribute::new(tag, vr, bulk))
    }

    /// Fetch an attribute by tag.
    pub fn get(&self, tag: Tag) -> Option<&Attribute> {
        self.position(tag).map(|i| &self.attributes[i])
    }

    /// Fetch an attribute by tag for modification.
    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut Attribute> {
        match self.position(tag) {
            Some(i) => Some(&mut self.attributes[i]),
            None => None,
        }
    }

    /// Whether an attribute with the given tag exists.
    pub fn contains(&self, tag: Tag) -> bool {
        self.position(tag).is_some()
    }

    /// Remove an attribute by tag, preserving the order of the others.
    pub fn remove(&mut self, tag: Tag) -> Option<Attribute> {
        self.position(tag).map(|i| self.attributes.remove(i))
    }

    /// Fetch the value of an attribute.
    pub fn value(&self, tag: Tag) -> Option<&Value> {
        self.get(tag).map(Attribute::value)
    }

    /// Fetch the raw bytes of a primitive attribute.
    pub fn bytes(&self, tag: Tag) -> Option<&[u8]> {
        self.value(tag).and_then(Value::bytes)
    }

    /// Fetch the sequence value of an attribute.
    pub fn sequence(&self, tag: Tag) -> Option<&Sequence> {
        self.value(tag).and_then(Value::sequence)
    }

    /// Fetch the items of a sequence attribute.
    pub fn items(&self, tag: Tag) -> Option<&[ItemSet]> {
        self.value(tag).and_then(Value::items)
    }

    /// Fetch the fragments of an attribute.
    pub fn fragments(&self, tag: Tag) -> Option<&Fragments> {
        self.value(tag).and_then(Value::fragments)
    }

    /// Fetch the bulk data reference of an attribute.
    pub fn bulk_data(&self, tag: Tag) -> Option<&BulkData> {
        self.value(tag).and_then(Value::bulk_data)
    }

    /// Interpret an attribute as a list of integers.
    pub fn ints(&self, tag: Tag) -> Option<Vec<i64>> {
        let attr = self.get(tag)?;
        num::read_ints(attr.vr, attr.value.bytes()?, self.big_endian)
    }

    /// Interpret an attribute as an integer, taking its first component.
    pub fn int(&self, tag: Tag) -> Option<i64> {
        self.ints(tag)?.first().copied()
    }

    /// Interpret an attribute as a list of floating point numbers.
    pub fn floats(&self, tag: Tag) -> Option<Vec<f64>> {
        let attr = self.get(tag)?;
        num::read_floats(attr.vr, attr.value.bytes()?, self.big_endian)
    }

    /// Interpret an attribute as a list of strings without padding.
    pub fn strings(&self, tag: Tag) -> Option<Vec<String>> {
        Some(num::read_strings(self.bytes(tag)?))
    }

    /// Interpret an attribute as a string, taking its first component.
    pub fn string(&self, tag: Tag) -> Option<String> {
        self.strings(tag)?.into_iter().next()
    }

    /// Retrieve the private creator identifying the block of a private tag,
    /// as recorded in this item set.
    pub fn private_creator(&self, tag: Tag) -> Option<String> {
        self.string(tag.private_creator_tag()?)
    }

    /// Find the block of the given private group reserved by `creator`,
    /// reserving the first free block if there is none.
    ///
    /// Returns the element number base of the block (e.g. `0x1000`),
    /// or `None` if the group is not private or all blocks are taken.
    pub fn reserve_private_block(&mut self, group: u16, creator: &str) -> Option<u16> {
        if group & 1 == 0 {
            return None;
        }
        let mut free = None;
        for block in 0x0010u16..=0x00FF {
            let tag = Tag(group, block);
            match self.string(tag) {
                Some(c) if c == creator => return Some(block << 8),
                Some(_) => {}
                None if free.is_none() && !self.contains(tag) => free = Some(block),
                None => {}
            }
        }
        let block = free?;
        self.put_str(Tag(group, block), VR::LO, creator);
        Some(block << 8)
    }

    /// Create a copy of this item set with values in the given byte order.
    ///
    /// Numeric values are swapped into new buffers,
    /// nested items are converted recursively.
    pub fn to_byte_order(&self, big_endian: bool) -> ItemSet {
        if big_endian == self.big_endian {
            return self.clone();
        }
        ItemSet {
            attributes: self
                .attributes
                .iter()
                .map(|a| Attribute {
                    tag: a.tag,
                    vr: a.vr,
                    value: a.value.to_byte_order(a.vr, self.big_endian, big_endian),
                })
                .collect(),
            ascending: self.ascending,
            big_endian,
            length: self.length,
        }
    }
}

impl Default for ItemSet {
    fn default() -> Self {
        ItemSet::new()
    }
}

impl HasLength for ItemSet {
    /// The length of the item as declared in the stream it was decoded from,
    /// undefined for item sets created programmatically.
    fn length(&self) -> Length {
        self.length
    }
}

/// Item sets are equal when they hold the same attributes in the same order,
/// comparing values in a common byte order.
impl PartialEq for ItemSet {
    fn eq(&self, other: &Self) -> bool {
        if self.big_endian == other.big_endian {
            self.attributes == other.attributes
        } else {
            self.attributes == other.to_byte_order(self.big_endian).attributes
        }
    }
}

impl fmt::Debug for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSet")
            .field("big_endian", &self.big_endian)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl Extend<Attribute> for ItemSet {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        for attribute in iter {
            self.put(attribute);
        }
    }
}

impl std::iter::FromIterator<Attribute> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = ItemSet::new();
        set.extend(iter);
        set
    }
}

/// One step of the path to the item currently being traversed:
/// the sequence attribute, its private creator if it is a private attribute,
/// and the index of the item within the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemPointer {
    /// The tag of the sequence attribute
    pub sequence_tag: Tag,
    /// The private creator of the sequence attribute, if private
    pub private_creator: Option<String>,
    /// The index of the item in the sequence
    pub item_index: usize,
}

impl ItemPointer {
    /// Create an item pointer to a public sequence.
    pub fn new(sequence_tag: Tag, item_index: usize) -> Self {
        ItemPointer {
            sequence_tag,
            private_creator: None,
            item_index,
        }
    }

    /// Create an item pointer to a private sequence.
    pub fn private(sequence_tag: Tag, private_creator: impl Into<String>, item_index: usize) -> Self {
        ItemPointer {
            sequence_tag,
            private_creator: Some(private_creator.into()),
            item_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_unique_tags() {
        let mut set = ItemSet::new();
        set.put_str(Tag(0x0010, 0x0020), VR::LO, "ID1");
        set.put_str(Tag(0x0008, 0x0060), VR::CS, "MR");
        set.put_str(Tag(0x0010, 0x0010), VR::PN, "Doe^John");

        let previous = set.put_str(Tag(0x0008, 0x0060), VR::CS, "CT");
        assert_eq!(previous.map(|a| a.into_value()), Some(Value::Bytes(b"MR".to_vec())));

        let tags: Vec<_> = set.tags().collect();
        assert_eq!(
            tags,
            vec![Tag(0x0010, 0x0020), Tag(0x0008, 0x0060), Tag(0x0010, 0x0010)]
        );
        assert_eq!(set.string(Tag(0x0008, 0x0060)).as_deref(), Some("CT"));
        assert_eq!(set.len(), 3);

        set.remove(Tag(0x0008, 0x0060));
        let tags: Vec<_> = set.tags().collect();
        assert_eq!(tags, vec![Tag(0x0010, 0x0020), Tag(0x0010, 0x0010)]);
    }

    #[test]
    fn replaces_earlier_tag_after_unordered_insertion() {
        let mut set = ItemSet::new();
        set.put_str(Tag(0x0010, 0x0020), VR::LO, "ID1");
        set.put_str(Tag(0x0008, 0x0060), VR::CS, "MR");
        set.put_str(Tag(0x0010, 0x0010), VR::PN, "Doe^John");

        let previous = set.put_str(Tag(0x0010, 0x0020), VR::LO, "ID2");
        assert!(previous.is_some());
        assert_eq!(set.len(), 3);
        assert_eq!(set.string(Tag(0x0010, 0x0020)).as_deref(), Some("ID2"));
        let tags: Vec<_> = set.tags().collect();
        assert_eq!(
            tags,
            vec![Tag(0x0010, 0x0020), Tag(0x0008, 0x0060), Tag(0x0010, 0x0010)]
        );
    }

    #[test]
    fn typed_accessors() {
        let mut set = ItemSet::with_byte_order(true);
        assert!(set.put_ints(Tag(0x0028, 0x0010), VR::US, &[512]));
        assert!(set.put_ints(Tag(0x0020, 0x0013), VR::IS, &[7]));
        assert!(set.put_floats(Tag(0x0018, 0x0050), VR::DS, &[2.5]));

        assert_eq!(set.bytes(Tag(0x0028, 0x0010)), Some(&[0x02, 0x00][..]));
        assert_eq!(set.int(Tag(0x0028, 0x0010)), Some(512));
        assert_eq!(set.int(Tag(0x0020, 0x0013)), Some(7));
        assert_eq!(set.floats(Tag(0x0018, 0x0050)), Some(vec![2.5]));
        assert!(!set.put_ints(Tag(0x0010, 0x0010), VR::PN, &[1]));
        assert!(!set.contains(Tag(0x0010, 0x0010)));
    }

    #[test]
    fn empty_sequence_is_empty_value() {
        let mut set = ItemSet::new();
        set.put_sequence(Tag(0x0008, 0x1115), vec![]);
        assert_eq!(set.value(Tag(0x0008, 0x1115)), Some(&Value::Empty));
        assert_eq!(set.get(Tag(0x0008, 0x1115)).map(|a| a.vr()), Some(VR::SQ));
    }

    #[test]
    fn private_creators() {
        let mut set = ItemSet::new();
        set.put_str(Tag(0x0029, 0x0010), VR::LO, "SIEMENS CSA HEADER");
        assert_eq!(
            set.private_creator(Tag(0x0029, 0x1010)).as_deref(),
            Some("SIEMENS CSA HEADER")
        );
        assert_eq!(set.private_creator(Tag(0x0029, 0x1110)), None);

        assert_eq!(set.reserve_private_block(0x0029, "SIEMENS CSA HEADER"), Some(0x1000));
        assert_eq!(set.reserve_private_block(0x0029, "ACME 1.0"), Some(0x1100));
        assert_eq!(set.string(Tag(0x0029, 0x0011)).as_deref(), Some("ACME 1.0"));
        assert_eq!(set.reserve_private_block(0x0028, "ACME 1.0"), None);
    }

    #[test]
    fn byte_order_conversion() {
        let mut item = ItemSet::new();
        assert!(item.put_ints(Tag(0x0028, 0x0100), VR::US, &[16]));
        let mut set = ItemSet::new();
        assert!(set.put_ints(Tag(0x0028, 0x0010), VR::US, &[0x0102]));
        set.put_str(Tag(0x0010, 0x0010), VR::PN, "Doe^John");
        set.put_sequence(Tag(0x0008, 0x1115), vec![item]);

        let be = set.to_byte_order(true);
        assert!(be.is_big_endian());
        assert_eq!(be.bytes(Tag(0x0028, 0x0010)), Some(&[0x01, 0x02][..]));
        assert_eq!(be.bytes(Tag(0x0010, 0x0010)), Some(&b"Doe^John"[..]));
        let nested = &be.items(Tag(0x0008, 0x1115)).unwrap()[0];
        assert!(nested.is_big_endian());
        assert_eq!(nested.bytes(Tag(0x0028, 0x0100)), Some(&[0x00, 0x10][..]));

        // equality compares in a common byte order
        assert_eq!(be, set);
        assert_eq!(be.to_byte_order(false).bytes(Tag(0x0028, 0x0010)), set.bytes(Tag(0x0028, 0x0010)));
    }
}
