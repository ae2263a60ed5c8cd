//! Module holding a stateful attribute encoding abstraction.
//!
//! The [`StatefulEncoder`] writes headers, delimiters and raw values
//! in the current transfer syntax,
//! applying the padding required by the encoding rules
//! and keeping track of how many bytes were written.

use dcmio_core::value::num;
use dcmio_core::{DataElementHeader, Tag, VR};
use dcmio_encoding::encode::basic::BasicEncoder;
use dcmio_encoding::encode::{self, BasicEncode, EncodeTo};
use dcmio_encoding::transfer_syntax::{DynEncoder, FinishWrite, TransferSyntax};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt;
use std::io::{self, Read, Write};
use tracing::debug;

const COPY_CHUNK_LEN: usize = 0x10000;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Encoding in transfer syntax {} is unsupported", ts))]
    UnsupportedTransferSyntax {
        ts: &'static str,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to encode a data piece at position {}", position))]
    EncodeData {
        position: u64,
        source: encode::Error,
    },

    #[snafu(display("Could not write value data at position {}", position))]
    WriteValueData {
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not copy {} value bytes of {} at position {}", len, tag, position))]
    CopyValueData {
        tag: Tag,
        len: u32,
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not finish the output"))]
    FinishOutput {
        source: io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// The output position at which the error occurred, if known.
    pub fn position(&self) -> Option<u64> {
        match self {
            Error::EncodeData { position, .. }
            | Error::WriteValueData { position, .. }
            | Error::CopyValueData { position, .. } => Some(*position),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The output of a stateful encoder:
/// the plain sink, or the sink behind a data set adapter.
pub enum Sink<'w> {
    Plain(Box<dyn Write + 'w>),
    Adapted(Box<dyn FinishWrite + 'w>),
    Closed,
}

impl fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sink::Plain(_) => f.write_str("Plain"),
            Sink::Adapted(_) => f.write_str("Adapted"),
            Sink::Closed => f.write_str("Closed"),
        }
    }
}

impl Write for Sink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Adapted(w) => w.write(buf),
            Sink::Closed => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "output already finished",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Adapted(w) => w.flush(),
            Sink::Closed => Ok(()),
        }
    }
}

/// Also called a printer, this encoder type provides a stateful mid-level
/// abstraction for writing attributes.
/// It knows the transfer syntax in use,
/// switching to the data set adapter (such as a compressor) when asked,
/// and keeps track of how many bytes were written.
pub struct StatefulEncoder<'w> {
    to: Sink<'w>,
    encoder: DynEncoder<'w, Sink<'w>>,
    basic: BasicEncoder,
    ts: TransferSyntax,
    bytes_written: u64,
}

impl fmt::Debug for StatefulEncoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StatefulEncoder")
            .field("to", &self.to)
            .field("ts", &self.ts.uid())
            .field("bytes_written", &self.bytes_written)
            .finish()
    }
}

impl<'w> StatefulEncoder<'w> {
    /// Create an encoder writing to `to` in the given transfer syntax.
    ///
    /// If the transfer syntax has a data set adapter,
    /// everything written goes through it.
    pub fn new<W>(to: W, ts: &TransferSyntax) -> Result<Self>
    where
        W: Write + 'w,
    {
        let encoder = ts
            .encoder_for::<Sink<'w>>()
            .context(UnsupportedTransferSyntaxSnafu { ts: ts.uid() })?;
        let mut out = StatefulEncoder {
            to: Sink::Plain(Box::new(to)),
            encoder,
            basic: ts.basic_encoder(),
            ts: *ts,
            bytes_written: 0,
        };
        out.adapt();
        Ok(out)
    }

    /// Continue writing in another transfer syntax,
    /// wrapping the output with its data set adapter if it has one.
    pub fn switch_transfer_syntax(&mut self, ts: &TransferSyntax) -> Result<()> {
        self.encoder = ts
            .encoder_for::<Sink<'w>>()
            .context(UnsupportedTransferSyntaxSnafu { ts: ts.uid() })?;
        self.basic = ts.basic_encoder();
        self.ts = *ts;
        self.adapt();
        Ok(())
    }

    fn adapt(&mut self) {
        let adapter = match self.ts.dataset_adapter() {
            Some(adapter) => adapter,
            None => return,
        };
        if let Sink::Plain(_) = self.to {
            if let Sink::Plain(plain) = std::mem::replace(&mut self.to, Sink::Closed) {
                debug!("Writing data set through {:?}", adapter);
                self.to = Sink::Adapted(adapter.adapt_writer(plain));
            }
        }
    }

    /// Encode and write an attribute header as is.
    pub fn encode_element_header(&mut self, de: DataElementHeader) -> Result<()> {
        let bytes = self
            .encoder
            .encode_element_header(&mut self.to, de)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += bytes as u64;
        Ok(())
    }

    /// Encode and write an item header,
    /// where `len` is the length of the item
    /// (can be `0xFFFF_FFFF` for undefined length).
    pub fn encode_item_header(&mut self, len: u32) -> Result<()> {
        self.encoder
            .encode_item_header(&mut self.to, len)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write an item delimiter.
    pub fn encode_item_delimiter(&mut self) -> Result<()> {
        self.encoder
            .encode_item_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write a sequence delimiter.
    pub fn encode_sequence_delimiter(&mut self) -> Result<()> {
        self.encoder
            .encode_sequence_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode an unsigned short in the byte order of the transfer syntax.
    pub fn encode_u16(&mut self, value: u16) -> Result<()> {
        self.basic
            .encode_us(&mut self.to, value)
            .context(WriteValueDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 2;
        Ok(())
    }

    /// Encode an unsigned long in the byte order of the transfer syntax.
    pub fn encode_u32(&mut self, value: u32) -> Result<()> {
        self.basic
            .encode_ul(&mut self.to, value)
            .context(WriteValueDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 4;
        Ok(())
    }

    /// Write the given bytes directly to the output.
    ///
    /// Note that this method
    /// (unlike [`write_bytes`](StatefulEncoder::write_bytes))
    /// does not perform any additional padding.
    pub fn write_raw_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.to.write_all(bytes).context(WriteValueDataSnafu {
            position: self.bytes_written,
        })?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Write a value,
    /// appending the `padding` byte if its length is odd.
    pub fn write_bytes(&mut self, bytes: &[u8], padding: u8) -> Result<()> {
        self.write_raw_bytes(bytes)?;
        if bytes.len() % 2 != 0 {
            self.write_raw_bytes(&[padding])?;
        }
        Ok(())
    }

    /// Copy a value of `len` bytes from `from`,
    /// swapping its byte order in units of `swap_unit` bytes if it is not 0,
    /// and appending the `padding` byte if the length is odd.
    pub fn copy_bytes(
        &mut self,
        tag: Tag,
        from: &mut dyn Read,
        len: u32,
        swap_unit: usize,
        padding: u8,
    ) -> Result<()> {
        let position = self.bytes_written;
        let mut remaining = len as usize;
        let mut buf = vec![0; remaining.min(COPY_CHUNK_LEN)];
        while remaining > 0 {
            let chunk = &mut buf[..remaining.min(COPY_CHUNK_LEN)];
            from.read_exact(chunk)
                .context(CopyValueDataSnafu { tag, len, position })?;
            if swap_unit > 1 {
                let swapped = num::swap_bytes(chunk, swap_unit);
                self.write_raw_bytes(&swapped)?;
            } else {
                let n = chunk.len();
                self.to
                    .write_all(chunk)
                    .context(CopyValueDataSnafu { tag, len, position })?;
                self.bytes_written += n as u64;
            }
            remaining -= chunk.len();
        }
        if len % 2 != 0 {
            self.write_raw_bytes(&[padding])?;
        }
        Ok(())
    }

    /// The number of bytes in the header of an attribute
    /// with the given value representation.
    pub fn header_len(&self, vr: VR) -> u32 {
        self.encoder.header_len(vr)
    }

    /// Retrieve the number of bytes written so far by this printer,
    /// before any data set adapter.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The current transfer syntax.
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        &self.ts
    }

    /// Whether values are written in big endian.
    pub fn is_big_endian(&self) -> bool {
        self.ts.is_big_endian()
    }

    /// Finish the output,
    /// completing the data set adapter if there is one
    /// and flushing the sink.
    pub fn finish(mut self) -> Result<()> {
        match std::mem::replace(&mut self.to, Sink::Closed) {
            Sink::Plain(mut w) => w.flush().context(FinishOutputSnafu),
            Sink::Adapted(w) => w.finish().context(FinishOutputSnafu),
            Sink::Closed => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StatefulEncoder;
    use dcmio_core::{DataElementHeader, Length, Tag, VR};
    use dcmio_transfer_syntax_registry::entries;
    use std::cell::RefCell;
    use std::io::{self, Read, Write};
    use std::rc::Rc;

    /// A sink which can be inspected after the encoder takes it.
    #[derive(Debug, Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn encode_explicit_le_element() {
        let sink = SharedSink::default();
        let mut encoder =
            StatefulEncoder::new(sink.clone(), &entries::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();
        encoder
            .encode_element_header(DataElementHeader::new(
                Tag(0x0010, 0x0010),
                VR::PN,
                Length(4),
            ))
            .unwrap();
        encoder.write_bytes(b"Doe", VR::PN.padding()).unwrap();
        assert_eq!(encoder.bytes_written(), 12);
        encoder.finish().unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            // (0010,0010) PN, len 4
            0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00,
            // padded with a space
            b'D', b'o', b'e', b' ',
        ];
        assert_eq!(&sink.0.borrow()[..], expected);
    }

    #[test]
    fn encode_big_endian_items_and_swapped_copy() {
        let sink = SharedSink::default();
        let mut encoder =
            StatefulEncoder::new(sink.clone(), &entries::EXPLICIT_VR_BIG_ENDIAN).unwrap();
        encoder.encode_item_header(4).unwrap();
        let mut value: &[u8] = &[0x01, 0x00, 0x02, 0x00];
        encoder
            .copy_bytes(Tag(0x0028, 0x0010), &mut value, 4, 2, 0)
            .unwrap();
        encoder.encode_item_delimiter().unwrap();
        encoder.encode_u16(1).unwrap();
        encoder.encode_u32(2).unwrap();
        assert_eq!(encoder.bytes_written(), 26);
        encoder.finish().unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            // item, len 4
            0xFF, 0xFE, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x04,
            // swapped values
            0x00, 0x01, 0x00, 0x02,
            // item delimiter
            0xFF, 0xFE, 0xE0, 0x0D, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x01,
            0x00, 0x00, 0x00, 0x02,
        ];
        assert_eq!(&sink.0.borrow()[..], expected);
    }

    #[test]
    fn short_copies_fail() {
        let mut out = Vec::new();
        let mut encoder =
            StatefulEncoder::new(&mut out, &entries::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();
        let mut value: &[u8] = &[1, 2];
        assert!(encoder
            .copy_bytes(Tag(0x0009, 0x1010), &mut value, 8, 0, 0)
            .is_err());
    }

    #[test]
    fn switch_to_deflate_after_meta() {
        use flate2::read::DeflateDecoder;

        let sink = SharedSink::default();
        let mut encoder =
            StatefulEncoder::new(sink.clone(), &entries::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();
        encoder.write_raw_bytes(b"META").unwrap();
        encoder
            .switch_transfer_syntax(&entries::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN)
            .unwrap();
        encoder
            .encode_element_header(DataElementHeader::new(
                Tag(0x0008, 0x0060),
                VR::CS,
                Length(2),
            ))
            .unwrap();
        encoder.write_bytes(b"MR", b' ').unwrap();
        encoder.finish().unwrap();

        let written = sink.0.borrow().clone();
        assert_eq!(&written[..4], b"META");
        let mut inflated = Vec::new();
        DeflateDecoder::new(&written[4..])
            .read_to_end(&mut inflated)
            .unwrap();
        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00,
            b'M', b'R',
        ];
        assert_eq!(inflated, expected);
    }
}
