//! Stateful decoding of attribute headers and raw values.
//!
//! A [`StatefulDecoder`] binds a byte source to the header decoder
//! of the current transfer syntax,
//! keeping track of the stream position
//! so that errors and bulk data references can point into the source.

use crate::source::{Mark, RecordingSource};
use dcmio_core::dictionary::DataDictionary;
use dcmio_core::header::{DataElementHeader, SequenceItemHeader};
use dcmio_core::Tag;
use dcmio_encoding::decode::basic::BasicDecoder;
use dcmio_encoding::decode::implicit_le::ImplicitVRLittleEndianDecoder;
use dcmio_encoding::decode::{self, BasicDecode, Decode};
use dcmio_encoding::transfer_syntax::{DynDecoder, TransferSyntax};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt;
use std::io::{self, Cursor, Read};
use tracing::debug;

/// Values are read in chunks of this size,
/// so that a bogus length fails on end of input
/// before the whole declared length is allocated.
const READ_CHUNK_LEN: usize = 0x10000;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Unsupported transfer syntax {}", uid))]
    UnsupportedTransferSyntax {
        uid: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not decode attribute header at position {}", position))]
    DecodeHeader {
        position: u64,
        source: decode::Error,
    },
    #[snafu(display("Could not decode item header at position {}", position))]
    DecodeItemHeader {
        position: u64,
        source: decode::Error,
    },
    #[snafu(display(
        "Could not read {} value bytes of {} at position {}",
        len,
        tag,
        position
    ))]
    ReadValue {
        tag: Tag,
        len: u32,
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not skip {} value bytes of {} at position {}", len, tag, position))]
    SkipValue {
        tag: Tag,
        len: u32,
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read from source at position {}", position))]
    ReadSource {
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not inflate data set"))]
    AdaptReader {
        source: io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// The stream position at which the error occurred, if known.
    pub fn position(&self) -> Option<u64> {
        match self {
            Error::DecodeHeader { position, .. }
            | Error::DecodeItemHeader { position, .. }
            | Error::ReadValue { position, .. }
            | Error::SkipValue { position, .. }
            | Error::ReadSource { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// The tag of the attribute concerned, if known.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Error::ReadValue { tag, .. } | Error::SkipValue { tag, .. } => Some(*tag),
            _ => None,
        }
    }

    /// Whether the error was caused by the input ending too soon.
    pub fn is_eof(&self) -> bool {
        match self {
            Error::DecodeHeader { source, .. } | Error::DecodeItemHeader { source, .. } => {
                source.is_eof()
            }
            Error::ReadValue { source, .. }
            | Error::SkipValue { source, .. }
            | Error::ReadSource { source, .. } => source.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The byte source of a stateful decoder.
pub type DynSource<'s> = RecordingSource<Box<dyn Read + 's>>;

/// A decoder of attribute headers and raw values
/// bound to a byte source.
///
/// `D` is the data dictionary used to resolve implicit value representations.
pub struct StatefulDecoder<'s, D> {
    source: DynSource<'s>,
    decoder: DynDecoder<'s, DynSource<'s>>,
    implicit: ImplicitVRLittleEndianDecoder<D>,
    basic: BasicDecoder,
    ts: TransferSyntax,
    dict: D,
    deflated: bool,
}

impl<D> fmt::Debug for StatefulDecoder<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StatefulDecoder")
            .field("ts", &self.ts.uid())
            .field("position", &self.source.position())
            .field("deflated", &self.deflated)
            .finish()
    }
}

impl<'s, D> StatefulDecoder<'s, D>
where
    D: DataDictionary + Clone + 's,
{
    /// Create a decoder over `source` in the given transfer syntax,
    /// starting at position 0.
    ///
    /// At most `recording_limit` bytes are recorded at a time
    /// for rewinding over-read sequences.
    pub fn new<S>(source: S, ts: &TransferSyntax, dict: D, recording_limit: usize) -> Result<Self>
    where
        S: Read + 's,
    {
        Self::with_position(source, ts, dict, recording_limit, 0)
    }

    /// Create a decoder over `source`,
    /// which starts at the given position of the stream.
    pub fn with_position<S>(
        source: S,
        ts: &TransferSyntax,
        dict: D,
        recording_limit: usize,
        position: u64,
    ) -> Result<Self>
    where
        S: Read + 's,
    {
        let decoder = ts
            .decoder_for::<DynSource<'s>, D>(dict.clone())
            .context(UnsupportedTransferSyntaxSnafu { uid: ts.uid() })?;
        let source: Box<dyn Read + 's> = Box::new(source);
        let mut out = StatefulDecoder {
            source: RecordingSource::with_position(source, recording_limit, position),
            decoder,
            implicit: ImplicitVRLittleEndianDecoder::with_dict(dict.clone()),
            basic: ts.basic_decoder(),
            ts: *ts,
            dict,
            deflated: false,
        };
        if ts.dataset_adapter().is_some() {
            out.inflate()?;
        }
        Ok(out)
    }

    /// Continue decoding the rest of the stream in another transfer syntax,
    /// inflating it if the transfer syntax requires so.
    pub fn switch_transfer_syntax(&mut self, ts: &TransferSyntax) -> Result<()> {
        self.decoder = ts
            .decoder_for::<DynSource<'s>, D>(self.dict.clone())
            .context(UnsupportedTransferSyntaxSnafu { uid: ts.uid() })?;
        self.basic = ts.basic_decoder();
        self.ts = *ts;
        debug!("Switched to transfer syntax {} ({})", ts.uid(), ts.name());
        if ts.dataset_adapter().is_some() && !self.deflated {
            self.inflate()?;
        }
        Ok(())
    }

    fn inflate(&mut self) -> Result<()> {
        let adapter = match self.ts.dataset_adapter() {
            Some(adapter) => adapter,
            None => return Ok(()),
        };
        let limit = self.source.limit();
        let position = self.source.position();
        let empty: Box<dyn Read + 's> = Box::new(io::empty());
        let source = std::mem::replace(&mut self.source, RecordingSource::new(empty, 0));
        let (pending, inner) = source.into_parts();
        let chained: Box<dyn Read + 's> = Box::new(Cursor::new(pending).chain(inner));
        let inflated = adapter.adapt_reader(chained).context(AdaptReaderSnafu)?;
        self.source = RecordingSource::with_position(inflated, limit, position);
        self.deflated = true;
        Ok(())
    }
}

impl<'s, D> StatefulDecoder<'s, D>
where
    D: DataDictionary,
{
    /// Decode the next attribute header,
    /// in implicit VR little endian if `implicit_le` is set,
    /// in the current transfer syntax otherwise.
    pub fn decode_header(&mut self, implicit_le: bool) -> Result<DataElementHeader> {
        let position = self.source.position();
        let (header, _) = if implicit_le {
            self.implicit.decode_header(&mut self.source)
        } else {
            self.decoder.decode_header(&mut self.source)
        }
        .context(DecodeHeaderSnafu { position })?;
        Ok(header)
    }

    /// Decode the next item header or delimiter.
    pub fn decode_item_header(&mut self, implicit_le: bool) -> Result<SequenceItemHeader> {
        let position = self.source.position();
        if implicit_le {
            self.implicit.decode_item_header(&mut self.source)
        } else {
            self.decoder.decode_item_header(&mut self.source)
        }
        .context(DecodeItemHeaderSnafu { position })
    }

    /// Read exactly `len` value bytes of the attribute `tag`.
    pub fn read_bytes(&mut self, tag: Tag, len: u32) -> Result<Vec<u8>> {
        let position = self.source.position();
        let total = len as usize;
        let mut buf = Vec::with_capacity(total.min(READ_CHUNK_LEN));
        while buf.len() < total {
            let start = buf.len();
            let end = total.min(start + READ_CHUNK_LEN);
            buf.resize(end, 0);
            self.source
                .read_exact(&mut buf[start..])
                .context(ReadValueSnafu { tag, len, position })?;
        }
        Ok(buf)
    }

    /// Skip over `len` value bytes of the attribute `tag`.
    pub fn skip_bytes(&mut self, tag: Tag, len: u32) -> Result<()> {
        let position = self.source.position();
        let skipped = io::copy(&mut (&mut self.source).take(u64::from(len)), &mut io::sink())
            .context(SkipValueSnafu { tag, len, position })?;
        if skipped < u64::from(len) {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof)).context(SkipValueSnafu {
                tag,
                len,
                position,
            });
        }
        Ok(())
    }

    /// Decode an unsigned short in the byte order of the transfer syntax.
    pub fn read_u16(&mut self) -> Result<u16> {
        let position = self.source.position();
        self.basic
            .decode_us(&mut self.source)
            .context(ReadSourceSnafu { position })
    }

    /// Decode an unsigned long in the byte order of the transfer syntax.
    pub fn read_u32(&mut self) -> Result<u32> {
        let position = self.source.position();
        self.basic
            .decode_ul(&mut self.source)
            .context(ReadSourceSnafu { position })
    }

    /// A reader of the next `len` bytes of the source.
    pub fn value_reader(&mut self, len: u32) -> io::Take<&mut DynSource<'s>> {
        (&mut self.source).take(u64::from(len))
    }

    /// Look at the next `n` bytes without consuming them.
    pub fn peek(&mut self, n: usize) -> Result<Vec<u8>> {
        let position = self.source.position();
        self.source.peek(n).context(ReadSourceSnafu { position })
    }

    /// Whether the source is exhausted.
    pub fn at_end(&mut self) -> Result<bool> {
        let position = self.source.position();
        self.source.at_end().context(ReadSourceSnafu { position })
    }

    /// Start recording the bytes read.
    pub fn mark(&mut self) -> Mark {
        self.source.mark()
    }

    /// Stop a recording, retrieving the recorded bytes if they fit in the window.
    pub fn release(&mut self, mark: Mark) -> Option<Vec<u8>> {
        self.source.release(mark)
    }

    /// Return the last bytes read to the source.
    pub fn unread(&mut self, bytes: &[u8]) {
        self.source.unread(bytes)
    }

    /// The number of bytes consumed from the start of the stream.
    ///
    /// Once the data set is inflated,
    /// positions count inflated bytes
    /// from the start of the compressed data.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// Whether the rest of the stream is being inflated.
    pub fn is_deflated(&self) -> bool {
        self.deflated
    }

    /// Whether the current transfer syntax is big endian.
    pub fn is_big_endian(&self) -> bool {
        self.ts.is_big_endian()
    }

    /// The current transfer syntax.
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        &self.ts
    }

    /// The data dictionary.
    pub fn dict(&self) -> &D {
        &self.dict
    }

    /// Take the remaining source, including any bytes pushed back.
    pub fn into_source(self) -> impl Read + 's {
        let (pending, inner) = self.source.into_parts();
        Cursor::new(pending).chain(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::StatefulDecoder;
    use dcmio_core::header::{HasLength, Header, Length, SequenceItemHeader};
    use dcmio_core::{Tag, VR};
    use dcmio_dictionary_std::StandardDataDictionary;
    use dcmio_transfer_syntax_registry::entries;
    use std::io::Write;

    #[rustfmt::skip]
    const EXPLICIT_LE: &[u8] = &[
        // (0010,0010) PN, len 4
        0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00,
        b'D', b'o', b'e', b' ',
        // (7FE0,0010) OB, undefined length
        0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
        // item, len 2
        0xFE, 0xFF, 0x00, 0xE0, 0x02, 0x00, 0x00, 0x00,
        0x01, 0x02,
        // sequence delimiter
        0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn headers_and_values() {
        let dict = StandardDataDictionary::new();
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let mut decoder = StatefulDecoder::new(EXPLICIT_LE, &ts, &dict, 64).unwrap();

        let header = decoder.decode_header(false).unwrap();
        assert_eq!(header.tag(), Tag(0x0010, 0x0010));
        assert_eq!(header.vr(), VR::PN);
        assert_eq!(decoder.position(), 8);
        assert_eq!(decoder.read_bytes(header.tag(), 4).unwrap(), b"Doe ".to_vec());

        let header = decoder.decode_header(false).unwrap();
        assert_eq!(header.length(), Length::UNDEFINED);
        assert_eq!(
            decoder.decode_item_header(false).unwrap(),
            SequenceItemHeader::Item { len: Length(2) }
        );
        decoder.skip_bytes(Tag::ITEM, 2).unwrap();
        assert_eq!(
            decoder.decode_item_header(false).unwrap(),
            SequenceItemHeader::SequenceDelimiter
        );
        assert!(decoder.at_end().unwrap());
        assert_eq!(decoder.position(), EXPLICIT_LE.len() as u64);
    }

    #[test]
    fn truncated_values_are_eof() {
        let dict = StandardDataDictionary::new();
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let mut decoder = StatefulDecoder::new(&EXPLICIT_LE[..10], &ts, &dict, 64).unwrap();
        let header = decoder.decode_header(false).unwrap();
        let err = decoder.read_bytes(header.tag(), 4).unwrap_err();
        assert!(err.is_eof());
        assert_eq!(err.position(), Some(8));
        assert_eq!(err.tag(), Some(Tag(0x0010, 0x0010)));

        let mut decoder = StatefulDecoder::new(&EXPLICIT_LE[..10], &ts, &dict, 64).unwrap();
        decoder.decode_header(false).unwrap();
        assert!(decoder.skip_bytes(Tag(0x0010, 0x0010), 4).unwrap_err().is_eof());
    }

    #[test]
    fn implicit_headers_on_demand() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (0008,0060) len 2, implicit
            0x08, 0x00, 0x60, 0x00, 0x02, 0x00, 0x00, 0x00,
            b'M', b'R',
        ];
        let dict = StandardDataDictionary::new();
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let mut decoder = StatefulDecoder::new(bytes, &ts, &dict, 64).unwrap();
        let header = decoder.decode_header(true).unwrap();
        assert_eq!(header.tag(), Tag(0x0008, 0x0060));
        assert_eq!(header.vr(), VR::CS);
        assert_eq!(header.length(), Length(2));
    }

    #[test]
    fn switch_to_deflated() {
        use flate2::write::DeflateEncoder;
        use flate2::Compression;

        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(&EXPLICIT_LE[..12]).unwrap();
        let compressed = encoder.finish().unwrap();

        let dict = StandardDataDictionary::new();
        let ts = entries::EXPLICIT_VR_LITTLE_ENDIAN;
        let mut decoder = StatefulDecoder::new(&compressed[..], &ts, &dict, 64).unwrap();
        // looking ahead before switching keeps the bytes
        assert_eq!(decoder.peek(2).unwrap().len(), 2);
        decoder
            .switch_transfer_syntax(&entries::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN)
            .unwrap();
        assert!(decoder.is_deflated());
        let header = decoder.decode_header(false).unwrap();
        assert_eq!(header.tag(), Tag(0x0010, 0x0010));
        assert_eq!(decoder.read_bytes(header.tag(), 4).unwrap(), b"Doe ".to_vec());
        assert!(decoder.at_end().unwrap());
    }
}
