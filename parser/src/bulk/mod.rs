//! Bulk data policy: which values are kept out of the attribute tree.
//!
//! [`BulkDataRules`] is a declarative description
//! of the attributes to externalize,
//! which can be loaded from any format supported by `serde`.
//! Besides the rules given by the user,
//! the large binary attributes of the standard are bulk data by default.
//!
//! ```
//! # use dcmio_core::{Tag, VR};
//! # use dcmio_parser::bulk::BulkDataRules;
//! let rules = BulkDataRules::default().with_length_threshold(&[VR::OB, VR::UN], 1024);
//!
//! // pixel data at the root of the data set
//! assert!(rules.is_bulk_data(&[], None, Tag(0x7FE0, 0x0010), VR::OW, 16));
//! // large enough opaque values
//! assert!(!rules.is_bulk_data(&[], None, Tag(0x0009, 0x1010), VR::OB, 1024));
//! assert!(rules.is_bulk_data(&[], None, Tag(0x0009, 0x1010), VR::OB, 1025));
//! ```

pub mod creator;
pub mod source;

pub use self::creator::{BulkDataCreator, SourceUriCreator, SpoolFileCreator};
pub use self::source::{BulkDataSource, FileBulkDataSource};

use dcmio_core::{ItemPointer, Tag, VR};
use dcmio_dictionary_std::tags;
use serde::{Deserialize, Serialize};

/// One step of the path to a nested attribute:
/// a sequence attribute, identified by its tag
/// and its private creator if it is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    /// the tag of the sequence
    pub sequence_tag: Tag,
    /// the private creator of the sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_creator: Option<String>,
}

impl PathStep {
    /// A step into a public sequence.
    pub fn new(sequence_tag: Tag) -> Self {
        PathStep {
            sequence_tag,
            private_creator: None,
        }
    }

    fn matches(&self, pointer: &ItemPointer) -> bool {
        self.sequence_tag == pointer.sequence_tag
            && self.private_creator.as_deref() == pointer.private_creator.as_deref()
    }
}

/// A selector of attributes by tag and location in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSelector {
    /// the tag of the attribute
    pub tag: Tag,
    /// the private creator of the attribute, for private attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_creator: Option<String>,
    /// the sequences in which the attribute is nested,
    /// empty for attributes at the root of the data set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathStep>,
}

impl AttributeSelector {
    /// Select an attribute at the root of the data set.
    pub fn new(tag: Tag) -> Self {
        AttributeSelector {
            tag,
            private_creator: None,
            path: Vec::new(),
        }
    }

    /// Select the attribute within the given sequence path.
    pub fn nested_in(mut self, path: impl IntoIterator<Item = PathStep>) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    /// Select a private attribute of the given creator.
    pub fn private(mut self, private_creator: impl Into<String>) -> Self {
        self.private_creator = Some(private_creator.into());
        self
    }

    /// Whether the attribute at the given location is selected.
    pub fn matches(
        &self,
        item_pointers: &[ItemPointer],
        private_creator: Option<&str>,
        tag: Tag,
    ) -> bool {
        self.tag == tag
            && self.private_creator.as_deref() == private_creator
            && self.path.len() == item_pointers.len()
            && self
                .path
                .iter()
                .zip(item_pointers)
                .all(|(step, pointer)| step.matches(pointer))
    }
}

/// Values of the given representations
/// longer than `length` bytes are bulk data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthThreshold {
    /// the value representations concerned
    pub vrs: Vec<VR>,
    /// the maximum length of values kept in the tree
    pub length: u32,
}

/// The rules deciding which attribute values are bulk data.
///
/// The rules are immutable once built
/// and can be shared by any number of readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDataRules {
    /// attributes which are always bulk data
    #[serde(default)]
    pub selectors: Vec<AttributeSelector>,
    /// length thresholds per value representation
    #[serde(default)]
    pub length_thresholds: Vec<LengthThreshold>,
    /// do not apply the default rules
    #[serde(default)]
    pub exclude_defaults: bool,
}

impl BulkDataRules {
    /// Rules which only select the standard large binary attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute selector.
    pub fn with_selector(mut self, selector: AttributeSelector) -> Self {
        self.selectors.push(selector);
        self
    }

    /// Add a length threshold for the given value representations.
    pub fn with_length_threshold(mut self, vrs: &[VR], length: u32) -> Self {
        self.length_thresholds.push(LengthThreshold {
            vrs: vrs.to_vec(),
            length,
        });
        self
    }

    /// Set whether to leave out the default rules.
    pub fn exclude_defaults(mut self, exclude: bool) -> Self {
        self.exclude_defaults = exclude;
        self
    }

    /// Decide whether the value of the attribute at the given location
    /// is bulk data.
    ///
    /// `item_pointers` is the path of sequences and items
    /// from the root of the data set to the item holding the attribute,
    /// `private_creator` identifies the block of a private attribute
    /// and `length` is the length of the value in bytes.
    pub fn is_bulk_data(
        &self,
        item_pointers: &[ItemPointer],
        private_creator: Option<&str>,
        tag: Tag,
        vr: VR,
        length: u32,
    ) -> bool {
        (!self.exclude_defaults && is_default_bulk_data(item_pointers, private_creator, tag))
            || self
                .selectors
                .iter()
                .any(|s| s.matches(item_pointers, private_creator, tag))
            || self
                .length_thresholds
                .iter()
                .any(|t| length > t.length && t.vrs.contains(&vr))
    }
}

/// The default rules: large binary attributes of the standard.
fn is_default_bulk_data(
    item_pointers: &[ItemPointer],
    private_creator: Option<&str>,
    tag: Tag,
) -> bool {
    if private_creator.is_some() {
        return false;
    }
    match item_pointers {
        [] => matches!(
            tag,
            tags::PIXEL_DATA
                | tags::FLOAT_PIXEL_DATA
                | tags::DOUBLE_FLOAT_PIXEL_DATA
                | tags::SPECTROSCOPY_DATA
                | tags::ENCAPSULATED_DOCUMENT
        ) || (tag.group() & 0xFF01 == 0x6000 && tag.element() == 0x3000),
        [pointer] => {
            pointer.sequence_tag == tags::WAVEFORM_SEQUENCE
                && pointer.private_creator.is_none()
                && tag == tags::WAVEFORM_DATA
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules() {
        let rules = BulkDataRules::new();
        assert!(rules.is_bulk_data(&[], None, tags::PIXEL_DATA, VR::OB, 0));
        assert!(rules.is_bulk_data(&[], None, tags::FLOAT_PIXEL_DATA, VR::OF, 4));
        assert!(rules.is_bulk_data(&[], None, tags::SPECTROSCOPY_DATA, VR::OF, 4));
        assert!(rules.is_bulk_data(&[], None, tags::ENCAPSULATED_DOCUMENT, VR::OB, 4));
        assert!(rules.is_bulk_data(&[], None, Tag(0x6002, 0x3000), VR::OW, 4));
        assert!(!rules.is_bulk_data(&[], None, Tag(0x6001, 0x3000), VR::OW, 4));
        assert!(!rules.is_bulk_data(&[], None, tags::PATIENT_NAME, VR::PN, 8));

        // waveform data only inside the waveform sequence
        let waveform = [ItemPointer::new(tags::WAVEFORM_SEQUENCE, 0)];
        assert!(rules.is_bulk_data(&waveform, None, tags::WAVEFORM_DATA, VR::OW, 8));
        assert!(!rules.is_bulk_data(&[], None, tags::WAVEFORM_DATA, VR::OW, 8));

        // pixel data in a nested item is not bulk data
        let nested = [ItemPointer::new(tags::REFERENCED_IMAGE_SEQUENCE, 1)];
        assert!(!rules.is_bulk_data(&nested, None, tags::PIXEL_DATA, VR::OB, 8));

        let rules = rules.exclude_defaults(true);
        assert!(!rules.is_bulk_data(&[], None, tags::PIXEL_DATA, VR::OB, 8));
    }

    #[test]
    fn length_threshold_is_strict() {
        let rules = BulkDataRules::new()
            .exclude_defaults(true)
            .with_length_threshold(&[VR::OB, VR::OW], 64);
        assert!(!rules.is_bulk_data(&[], None, Tag(0x0009, 0x1002), VR::OB, 64));
        assert!(rules.is_bulk_data(&[], None, Tag(0x0009, 0x1002), VR::OB, 65));
        assert!(!rules.is_bulk_data(&[], None, Tag(0x0009, 0x1002), VR::LO, 65));
    }

    #[test]
    fn selectors_with_paths_and_creators() {
        let rules = BulkDataRules::new().with_selector(
            AttributeSelector::new(Tag(0x0019, 0x1010))
                .private("ACME 1.0")
                .nested_in(vec![PathStep::new(tags::REFERENCED_SERIES_SEQUENCE)]),
        );
        let path = [ItemPointer::new(tags::REFERENCED_SERIES_SEQUENCE, 3)];
        assert!(rules.is_bulk_data(&path, Some("ACME 1.0"), Tag(0x0019, 0x1010), VR::OB, 2));
        assert!(!rules.is_bulk_data(&path, Some("OTHER"), Tag(0x0019, 0x1010), VR::OB, 2));
        assert!(!rules.is_bulk_data(&[], Some("ACME 1.0"), Tag(0x0019, 0x1010), VR::OB, 2));
    }

    #[test]
    fn rules_from_json() {
        let json = r#"{
            "selectors": [
                { "tag": "(0009,1001)", "privateCreator": "ACME 1.0" },
                { "tag": "(0040,A160)", "path": [{ "sequenceTag": "(0040,A730)" }] }
            ],
            "lengthThresholds": [{ "vrs": ["OB", "UN"], "length": 4096 }],
            "excludeDefaults": true
        }"#;
        let rules: BulkDataRules = serde_json::from_str(json).unwrap();
        assert!(rules.exclude_defaults);
        assert_eq!(rules.selectors.len(), 2);
        assert_eq!(
            rules.selectors[1].path,
            vec![PathStep::new(Tag(0x0040, 0xA730))]
        );
        assert_eq!(rules.length_thresholds[0].vrs, vec![VR::OB, VR::UN]);
        assert!(rules.is_bulk_data(&[], None, Tag(0x0009, 0x1002), VR::UN, 4097));

        let back: BulkDataRules =
            serde_json::from_str(&serde_json::to_string(&rules).unwrap()).unwrap();
        assert_eq!(back, rules);
    }
}
