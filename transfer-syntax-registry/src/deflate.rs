//! Implementation of Deflated Explicit VR Little Endian.
use std::io::{self, Cursor, Read, Write};

use dcmio_encoding::transfer_syntax::{DataRWAdapter, FinishWrite};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::DeflateEncoder;
use flate2::Compression;

/// Immaterial type representing an adapter for deflated data.
///
/// Readers accept both raw deflate streams and zlib-wrapped streams,
/// which some writers produce in spite of the standard.
/// Writers always produce raw deflate streams.
#[derive(Debug)]
pub struct FlateAdapter;

impl DataRWAdapter for FlateAdapter {
    fn adapt_reader<'r>(&self, mut reader: Box<dyn Read + 'r>) -> io::Result<Box<dyn Read + 'r>> {
        let mut head = [0u8; 2];
        let mut n = 0;
        while n < head.len() {
            match reader.read(&mut head[n..]) {
                Ok(0) => break,
                Ok(k) => n += k,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        let zlib = n == 2 && is_zlib_header(head[0], head[1]);
        let source = Cursor::new(head).take(n as u64).chain(reader);
        if zlib {
            tracing::debug!("Inflating zlib-wrapped data set");
            Ok(Box::new(ZlibDecoder::new(source)))
        } else {
            Ok(Box::new(DeflateDecoder::new(source)))
        }
    }

    fn adapt_writer<'w>(&self, writer: Box<dyn Write + 'w>) -> Box<dyn FinishWrite + 'w> {
        Box::new(DeflateWriter {
            inner: CountingWriter::new(DeflateEncoder::new(writer, Compression::fast())),
        })
    }
}

/// Whether the two bytes form a valid zlib stream header
/// (deflate compression method and a consistent check value).
pub fn is_zlib_header(cmf: u8, flg: u8) -> bool {
    cmf & 0x0F == 8 && ((u16::from(cmf) << 8) | u16::from(flg)) % 31 == 0
}

/// A writer which keeps track of how many bytes went through it.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        CountingWriter { inner, count: 0 }
    }

    /// The number of bytes written so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// The deflating data set writer.
///
/// Finishing pads the uncompressed data to an even length.
/// Dropping it without finishing still releases the compressor.
struct DeflateWriter<'w> {
    inner: CountingWriter<DeflateEncoder<Box<dyn Write + 'w>>>,
}

impl Write for DeflateWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl FinishWrite for DeflateWriter<'_> {
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        if self.inner.count() % 2 == 1 {
            self.inner.write_all(&[0])?;
        }
        let mut out = self.inner.into_inner().finish()?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::{is_zlib_header, FlateAdapter};
    use dcmio_encoding::transfer_syntax::DataRWAdapter;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut writer = FlateAdapter.adapt_writer(Box::new(&mut out));
            writer.write_all(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut reader = FlateAdapter.adapt_reader(Box::new(data)).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn zlib_headers() {
        assert!(is_zlib_header(0x78, 0x9C));
        assert!(is_zlib_header(0x78, 0x01));
        assert!(is_zlib_header(0x78, 0xDA));
        assert!(!is_zlib_header(0x78, 0x9D));
        assert!(!is_zlib_header(0x08, 0x00));
    }

    #[test]
    fn raw_deflate_roundtrip_pads_odd_length() {
        let data = b"(0010,0010) PN Doe^John";
        assert_eq!(data.len() % 2, 1);
        let compressed = deflate(data);
        let inflated = inflate(&compressed);
        assert_eq!(inflated.len(), data.len() + 1);
        assert_eq!(&inflated[..data.len()], &data[..]);
        assert_eq!(inflated[data.len()], 0);
    }

    #[test]
    fn even_length_is_not_padded() {
        let data = b"ABCDEFGH";
        assert_eq!(inflate(&deflate(data)), data.to_vec());
    }

    #[test]
    fn reads_zlib_wrapped_data() {
        let data = b"zlib wrapped data set";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        let compressed = encoder.finish().unwrap();
        assert!(is_zlib_header(compressed[0], compressed[1]));
        assert_eq!(inflate(&compressed), data.to_vec());
    }

    #[test]
    fn empty_input() {
        assert!(inflate(&deflate(&[])).is_empty());
    }
}
