//! Resolution of the encoding dialect of a DICOM stream.
//!
//! The dialect (byte order and VR explicitness) of a stream
//! is either declared by a transfer syntax UID,
//! usually in the file meta group,
//! or guessed from the first bytes of the data set.
//!
//! ```
//! # use dcmio_dictionary_std::StandardDataDictionary;
//! # use dcmio_transfer_syntax_registry::resolve::{detect_preamble, sniff};
//! // (0008,0060) CS "OT", explicit VR little endian
//! let bytes = [0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00, b'O', b'T'];
//! assert_eq!(detect_preamble(&bytes), 0);
//! let dict = StandardDataDictionary::new();
//! let ts = sniff(&bytes, &dict)?;
//! assert!(ts.is_explicit_vr());
//! # Ok::<_, dcmio_transfer_syntax_registry::resolve::Error>(())
//! ```

use crate::entries;
use crate::TransferSyntaxRegistry;
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use dcmio_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dcmio_core::{Tag, VR};
use dcmio_encoding::transfer_syntax::{TransferSyntax, TransferSyntaxIndex};
use snafu::{Backtrace, Snafu};
use tracing::{debug, warn};

/// The length of the file preamble.
pub const PREAMBLE_LEN: usize = 128;

/// The magic code following the preamble.
pub const MAGIC: &[u8; 4] = b"DICM";

/// The maximum number of bytes worth inspecting
/// to guess the dialect of a data set.
pub const SNIFF_LEN: usize = 128;

/// An error resolving the dialect of a stream.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// No dialect explains the first bytes of the stream
    #[snafu(display("Could not resolve encoding dialect from {} leading bytes", len))]
    UnresolvableDialect { len: usize, backtrace: Backtrace },
    /// The stream looks like implicit VR big endian
    #[snafu(display("Implicit VR big endian is not a valid encoding"))]
    ImplicitBigEndian { backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

static IMPLICIT_VR_LE: TransferSyntax = entries::IMPLICIT_VR_LITTLE_ENDIAN;
static EXPLICIT_VR_LE: TransferSyntax = entries::EXPLICIT_VR_LITTLE_ENDIAN;
static EXPLICIT_VR_BE: TransferSyntax = entries::EXPLICIT_VR_BIG_ENDIAN;

/// Detect a file preamble and magic code
/// at the beginning of the given bytes.
///
/// Returns the number of bytes to skip before the file meta group:
/// 132 for a 128-byte preamble followed by `DICM`,
/// 4 for a bare `DICM` marker,
/// and 0 if neither is present.
pub fn detect_preamble(bytes: &[u8]) -> usize {
    if bytes.len() >= PREAMBLE_LEN + 4 && &bytes[PREAMBLE_LEN..PREAMBLE_LEN + 4] == MAGIC {
        PREAMBLE_LEN + 4
    } else if bytes.starts_with(MAGIC) {
        4
    } else {
        0
    }
}

/// Guess the encoding dialect of a data set from its first bytes.
///
/// The first attribute header is read in little endian and then big endian.
/// A byte order is only considered
/// if the dictionary knows the VR of the tag read in that order.
/// The stream is then explicit VR
/// if the two bytes after the tag form that VR's code,
/// or implicit VR if the 4-byte length fits in the given bytes.
///
/// The resulting transfer syntax is one of
/// implicit VR little endian, explicit VR little endian
/// and explicit VR big endian.
pub fn sniff<D>(bytes: &[u8], dict: &D) -> Result<&'static TransferSyntax>
where
    D: DataDictionary,
{
    if bytes.len() < 8 {
        return UnresolvableDialectSnafu { len: bytes.len() }.fail();
    }
    let rlen = bytes.len().min(SNIFF_LEN) as u64;
    let vr_code = [bytes[4], bytes[5]];

    // little endian
    let tag = Tag(LittleEndian::read_u16(&bytes[0..2]), LittleEndian::read_u16(&bytes[2..4]));
    if let Some(vr) = dictionary_vr(dict, tag) {
        if vr.to_bytes() == vr_code {
            debug!("Data set {} resolved as explicit VR little endian", tag);
            return Ok(&EXPLICIT_VR_LE);
        }
        if 8 + u64::from(LittleEndian::read_u32(&bytes[4..8])) <= rlen {
            debug!("Data set {} resolved as implicit VR little endian", tag);
            return Ok(&IMPLICIT_VR_LE);
        }
    }

    // big endian
    let tag = Tag(BigEndian::read_u16(&bytes[0..2]), BigEndian::read_u16(&bytes[2..4]));
    if let Some(vr) = dictionary_vr(dict, tag) {
        if vr.to_bytes() == vr_code {
            debug!("Data set {} resolved as explicit VR big endian", tag);
            return Ok(&EXPLICIT_VR_BE);
        }
        if 8 + u64::from(BigEndian::read_u32(&bytes[4..8])) <= rlen {
            return ImplicitBigEndianSnafu.fail();
        }
    }

    UnresolvableDialectSnafu { len: bytes.len() }.fail()
}

fn dictionary_vr<D>(dict: &D, tag: Tag) -> Option<VR>
where
    D: DataDictionary,
{
    if tag.group() == 0xFFFE {
        return None;
    }
    dict.by_tag(tag).map(|e| e.vr().relaxed())
}

/// Obtain the transfer syntax declared by the given UID,
/// to be used for the rest of the stream.
///
/// An unknown UID falls back to explicit VR little endian,
/// which is what most transfer syntaxes with encapsulated pixel data use.
pub fn switch<'a, I>(index: &'a I, uid: &str) -> &'a TransferSyntax
where
    I: TransferSyntaxIndex,
{
    match index.get(uid) {
        Some(ts) => {
            debug!("Switching to transfer syntax {}", ts.name());
            ts
        }
        None => {
            warn!(
                "Unknown transfer syntax `{}`, assuming explicit VR little endian",
                uid.trim_end_matches('\0')
            );
            &EXPLICIT_VR_LE
        }
    }
}

impl TransferSyntaxRegistry {
    /// Obtain the transfer syntax declared by the given UID,
    /// falling back to explicit VR little endian if it is unknown.
    pub fn get_or_default(&self, uid: &str) -> &TransferSyntax {
        switch(self, uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::dictionary::StubDataDictionary;
    use dcmio_dictionary_std::StandardDataDictionary;

    #[test]
    fn preamble_detection() {
        let mut bytes = vec![0u8; 140];
        assert_eq!(detect_preamble(&bytes), 0);
        bytes[128..132].copy_from_slice(b"DICM");
        assert_eq!(detect_preamble(&bytes), 132);
        assert_eq!(detect_preamble(b"DICM\x02\x00\x00\x00"), 4);
        assert_eq!(detect_preamble(b"DIC"), 0);
    }

    #[rustfmt::skip]
    const EXPLICIT_LE: &[u8] = &[
        0x08, 0x00, 0x60, 0x00, // (0008,0060) Modality
        b'C', b'S', // VR: CS
        0x02, 0x00, // length: 2
        b'O', b'T',
    ];

    #[rustfmt::skip]
    const IMPLICIT_LE: &[u8] = &[
        0x08, 0x00, 0x60, 0x00, // (0008,0060) Modality
        0x02, 0x00, 0x00, 0x00, // length: 2
        b'O', b'T',
    ];

    #[rustfmt::skip]
    const EXPLICIT_BE: &[u8] = &[
        0x00, 0x28, 0x00, 0x10, // (0028,0010) Rows
        b'U', b'S', // VR: US
        0x00, 0x02, // length: 2
        0x02, 0x00,
    ];

    #[rustfmt::skip]
    const IMPLICIT_BE: &[u8] = &[
        0x00, 0x28, 0x00, 0x10, // (0028,0010) Rows
        0x00, 0x00, 0x00, 0x02, // length: 2
        0x02, 0x00,
    ];

    #[test]
    fn sniff_dialects() {
        let dict = StandardDataDictionary::new();
        assert_eq!(sniff(EXPLICIT_LE, &dict).unwrap().uid(), "1.2.840.10008.1.2.1");
        assert_eq!(sniff(IMPLICIT_LE, &dict).unwrap().uid(), "1.2.840.10008.1.2");
        assert_eq!(sniff(EXPLICIT_BE, &dict).unwrap().uid(), "1.2.840.10008.1.2.2");
    }

    #[test]
    fn sniff_rejects_implicit_big_endian() {
        let dict = StandardDataDictionary::new();
        assert!(matches!(
            sniff(IMPLICIT_BE, &dict),
            Err(Error::ImplicitBigEndian { .. })
        ));
    }

    #[test]
    fn sniff_unresolvable() {
        let dict = StandardDataDictionary::new();
        // too short
        assert!(matches!(
            sniff(&EXPLICIT_LE[..7], &dict),
            Err(Error::UnresolvableDialect { len: 7, .. })
        ));
        // unknown to the dictionary
        assert!(matches!(
            sniff(EXPLICIT_LE, &StubDataDictionary),
            Err(Error::UnresolvableDialect { .. })
        ));
        // implicit length beyond the buffered bytes
        let mut truncated = IMPLICIT_LE.to_vec();
        truncated[4] = 0x40;
        assert!(matches!(
            sniff(&truncated, &dict),
            Err(Error::UnresolvableDialect { .. })
        ));
    }

    #[test]
    fn switch_falls_back_to_explicit_le() {
        let registry = TransferSyntaxRegistry::new();
        assert_eq!(switch(&registry, "1.2.840.10008.1.2\0").uid(), "1.2.840.10008.1.2");
        assert!(switch(&registry, "1.2.840.10008.1.2.1.99").is_deflated());
        let ts = registry.get_or_default("1.2.3.4.5.6");
        assert_eq!(ts.uid(), "1.2.840.10008.1.2.1");
        assert!(ts.is_explicit_vr());
        assert!(!ts.is_big_endian());
    }
}
