//! Fragmented values of undefined length,
//! such as encapsulated pixel data.
use crate::header::VR;
use crate::value::{num, BulkData, C};

/// A single item of a fragmented value.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// The fragment's bytes, held in memory.
    Bytes(Vec<u8>),
    /// The fragment's bytes, held outside of the tree.
    BulkData(BulkData),
}

impl Fragment {
    /// The number of bytes in this fragment.
    pub fn len(&self) -> u64 {
        match self {
            Fragment::Bytes(b) => b.len() as u64,
            Fragment::BulkData(b) => u64::from(b.length()),
        }
    }

    /// Whether this fragment holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fragment's bytes, if held in memory.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Fragment::Bytes(b) => Some(b),
            Fragment::BulkData(_) => None,
        }
    }
}

impl From<Vec<u8>> for Fragment {
    fn from(bytes: Vec<u8>) -> Self {
        Fragment::Bytes(bytes)
    }
}

/// The ordered list of fragments of an undefined length value.
///
/// By convention, the first fragment of encapsulated pixel data
/// is the basic offset table, which may be empty.
/// It is kept here as any other fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragments {
    fragments: C<Fragment>,
}

impl Fragments {
    /// Create an empty list of fragments.
    pub fn new() -> Self {
        Fragments::default()
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: impl Into<Fragment>) {
        self.fragments.push(fragment.into());
    }

    /// The fragments in order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub(crate) fn to_byte_order(&self, vr: VR, big_endian: bool, target_big_endian: bool) -> Self {
        if big_endian == target_big_endian {
            return self.clone();
        }
        Fragments {
            fragments: self
                .fragments
                .iter()
                .map(|f| match f {
                    Fragment::Bytes(b) => Fragment::Bytes(num::swap_bytes(b, vr.swap_unit())),
                    other => other.clone(),
                })
                .collect(),
        }
    }
}

impl<F> From<Vec<F>> for Fragments
where
    F: Into<Fragment>,
{
    fn from(fragments: Vec<F>) -> Self {
        Fragments {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }
}
