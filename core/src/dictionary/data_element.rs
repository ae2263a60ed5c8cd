//! Attribute dictionary traits and entry types.

use crate::header::{Tag, VR};

/// The tags an attribute entry stands for.
///
/// Most attributes have one tag,
/// but repeating groups such as _Overlay Data_ (60xx,3000)
/// leave part of the tag open.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TagRange {
    /// A single tag.
    Single(Tag),
    /// `(GGxx,EEEE)`
    Group100(Tag),
    /// `(GGGG,EExx)`
    Element100(Tag),
    /// Any `(GGGG,0000)`.
    GroupLength,
    /// Any `(GGGG,00xx)` with an odd group, `xx` from `10` to `FF`.
    PrivateCreator,
}

impl TagRange {
    /// A representative tag of the range, open digits zeroed.
    pub fn inner(self) -> Tag {
        match self {
            TagRange::Single(tag) => tag,
            TagRange::Group100(tag) => tag,
            TagRange::Element100(tag) => tag,
            TagRange::GroupLength => Tag(0x0000, 0x0000),
            TagRange::PrivateCreator => Tag(0x0009, 0x0010),
        }
    }

    /// Check whether the given tag is covered by this range.
    pub fn contains(self, tag: Tag) -> bool {
        match self {
            TagRange::Single(t) => t == tag,
            TagRange::Group100(t) => t.0 == tag.0 & 0xFF00 && t.1 == tag.1,
            TagRange::Element100(t) => t.0 == tag.0 && t.1 == tag.1 & 0xFF00,
            TagRange::GroupLength => tag.is_group_length(),
            TagRange::PrivateCreator => tag.is_private_creator(),
        }
    }
}

/// The VR of a dictionary entry.
///
/// Some attributes take their VR from the data set around them,
/// such as _Pixel Data_ being `OB` or `OW`
/// depending on _Bits Allocated_.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum VirtualVr {
    /// Known without context.
    Exact(VR),
    /// `US` or `SS`, following _Pixel Representation_.
    Xs,
    /// Overlay data, `OB` or `OW`.
    Ox,
    /// Pixel data, `OB` or `OW`.
    Px,
    /// LUT data, `US` or `OW`.
    Lt,
}

impl VirtualVr {
    /// The VR, when it does not depend on context.
    pub fn exact(self) -> Option<VR> {
        match self {
            VirtualVr::Exact(vr) => Some(vr),
            _ => None,
        }
    }

    /// The VR to assume when the context is missing:
    /// `US` for `Xs`, `OW` for the others.
    pub fn relaxed(self) -> VR {
        match self {
            VirtualVr::Exact(vr) => vr,
            VirtualVr::Xs => VR::US,
            VirtualVr::Ox => VR::OW,
            VirtualVr::Px => VR::OW,
            VirtualVr::Lt => VR::OW,
        }
    }
}

/// An attribute dictionary, looked up by tag, keyword or private block.
///
/// Lookups return `None` for unknown attributes.
pub trait DataDictionary {
    /// The type of the dictionary entry.
    type Entry: DataDictionaryEntry;

    /// Fetch a data element entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Fetch an entry by its keyword, such as `PatientName`.
    /// Keywords are case sensitive.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch the entry of a private data element
    /// in the block reserved by the given private creator.
    ///
    /// The default implementation knows no private attributes.
    fn by_private_tag(&self, _creator: &str, _tag: Tag) -> Option<&Self::Entry> {
        None
    }

    /// Interpret a tag expression (`(0010,0010)`, `0010,0010`, `00100010`)
    /// or a keyword.
    fn parse_tag(&self, tag: &str) -> Option<Tag> {
        tag.parse()
            .ok()
            .or_else(|| self.by_name(tag).map(|e| e.tag()))
    }
}

impl<D> DataDictionary for &D
where
    D: DataDictionary + ?Sized,
{
    type Entry = D::Entry;

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }

    fn by_private_tag(&self, creator: &str, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_private_tag(creator, tag)
    }
}

/// An attribute as described by a dictionary.
pub trait DataDictionaryEntry {
    /// The tags covered by this entry.
    fn tag_range(&self) -> TagRange;

    /// A representative tag of the entry.
    fn tag(&self) -> Tag {
        self.tag_range().inner()
    }

    /// The keyword of the attribute.
    fn alias(&self) -> &str;

    /// The VR, possibly dependent on context.
    fn vr(&self) -> VirtualVr;
}

/// A statically known dictionary entry.
#[derive(Debug, PartialEq, Clone)]
pub struct DataDictionaryEntryRef<'a> {
    /// The tags covered
    pub tag: TagRange,
    /// The keyword
    pub alias: &'a str,
    /// The VR, possibly dependent on context
    pub vr: VirtualVr,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag_range(&self) -> TagRange {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VirtualVr {
        self.vr
    }
}
