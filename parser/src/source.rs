//! A byte source with push-back and recording capabilities.
//!
//! [`RecordingSource`] keeps track of the stream position,
//! lets the parser look ahead and return bytes to the stream,
//! and records what was read since one or more marks
//! so that a bounded window of the stream can be revisited.

use std::collections::VecDeque;
use std::io::{self, Read};

/// A handle to a recording started with [`RecordingSource::mark`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mark(usize);

/// A reader which keeps track of its position,
/// supports pushing bytes back,
/// and records the bytes read since the active marks.
#[derive(Debug)]
pub struct RecordingSource<R> {
    inner: R,
    pending: VecDeque<u8>,
    position: u64,
    record: Vec<u8>,
    /// start of each mark in `record`, `None` once it overflowed
    marks: Vec<Option<usize>>,
    limit: usize,
}

impl<R> RecordingSource<R> {
    /// Create a new source at position 0,
    /// recording at most `limit` bytes at a time.
    pub fn new(inner: R, limit: usize) -> Self {
        Self::with_position(inner, limit, 0)
    }

    /// Create a new source starting at the given position.
    pub fn with_position(inner: R, limit: usize, position: u64) -> Self {
        RecordingSource {
            inner,
            pending: VecDeque::new(),
            position,
            record: Vec::new(),
            marks: Vec::new(),
            limit,
        }
    }

    /// The number of bytes read from the start of the stream.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The maximum number of bytes recorded at a time.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Start recording the bytes read from now on.
    pub fn mark(&mut self) -> Mark {
        self.marks.push(Some(self.record.len()));
        Mark(self.marks.len() - 1)
    }

    /// Stop the recording started by `mark`,
    /// as well as any recording started after it,
    /// returning the bytes read since the mark.
    ///
    /// Returns `None` if the recording exceeded the limit.
    pub fn release(&mut self, mark: Mark) -> Option<Vec<u8>> {
        let start = self.marks.get(mark.0).copied().flatten();
        let recorded = start.map(|start| self.record[start..].to_vec());
        self.marks.truncate(mark.0);
        if self.marks.is_empty() {
            self.record.clear();
        }
        recorded
    }

    /// Return the given bytes to the stream,
    /// so that they are read again before anything else.
    ///
    /// The bytes must be the last ones read from this source.
    pub fn unread(&mut self, bytes: &[u8]) {
        for &b in bytes.iter().rev() {
            self.pending.push_front(b);
        }
        self.position = self.position.saturating_sub(bytes.len() as u64);
        if !self.marks.is_empty() {
            let len = self.record.len().saturating_sub(bytes.len());
            self.record.truncate(len);
            for mark in &mut self.marks {
                if matches!(mark, Some(start) if *start > len) {
                    *mark = None;
                }
            }
        }
    }

    /// Disassemble the source into the bytes pushed back
    /// and the inner reader.
    pub fn into_parts(self) -> (Vec<u8>, R) {
        (self.pending.into_iter().collect(), self.inner)
    }

    fn recorded(&mut self, bytes: &[u8]) {
        if self.marks.iter().all(Option::is_none) {
            return;
        }
        if self.record.len() + bytes.len() > self.limit {
            self.record.clear();
            for mark in &mut self.marks {
                *mark = None;
            }
            return;
        }
        self.record.extend_from_slice(bytes);
    }
}

impl<R: Read> RecordingSource<R> {
    /// Look at the next bytes without consuming them.
    ///
    /// The returned slice is shorter than `n` only at the end of the stream.
    pub fn peek(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0; n];
        let mut filled = 0;
        while filled < n {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(k) => filled += k,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        buf.truncate(filled);
        self.unread(&buf);
        Ok(buf)
    }

    /// Whether there are no more bytes to read.
    pub fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.peek(1)?.is_empty())
    }
}

impl<R: Read> Read for RecordingSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = if self.pending.is_empty() {
            self.inner.read(buf)?
        } else {
            let n = buf.len().min(self.pending.len());
            for (dst, src) in buf.iter_mut().zip(self.pending.drain(..n)) {
                *dst = src;
            }
            n
        };
        self.position += n as u64;
        if !self.marks.is_empty() {
            self.recorded(&buf[..n]);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingSource;
    use std::io::Read;

    #[test]
    fn peek_does_not_consume() {
        let mut source = RecordingSource::new(&b"DICM\x02\x00"[..], 64);
        assert_eq!(source.peek(4).unwrap(), b"DICM".to_vec());
        assert_eq!(source.position(), 0);
        let mut buf = [0; 6];
        source.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"DICM\x02\x00");
        assert_eq!(source.position(), 6);
        assert!(source.at_end().unwrap());
        assert_eq!(source.peek(8).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn recording_and_unread() {
        let mut source = RecordingSource::new(&[1u8, 2, 3, 4, 5, 6, 7, 8][..], 64);
        let mut buf = [0; 2];
        source.read_exact(&mut buf).unwrap();

        let outer = source.mark();
        source.read_exact(&mut buf).unwrap();
        let inner = source.mark();
        source.read_exact(&mut buf).unwrap();
        assert_eq!(source.release(inner), Some(vec![5, 6]));

        // give back the last byte
        source.unread(&[6]);
        assert_eq!(source.position(), 5);
        assert_eq!(source.release(outer), Some(vec![3, 4, 5]));

        let mut rest = Vec::new();
        source.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, vec![6, 7, 8]);
        assert_eq!(source.position(), 8);
    }

    #[test]
    fn recording_limit() {
        let mut source = RecordingSource::new(&[0u8; 32][..], 8);
        let mark = source.mark();
        let mut buf = [0; 16];
        source.read_exact(&mut buf).unwrap();
        assert_eq!(source.release(mark), None);

        let mark = source.mark();
        source.read_exact(&mut buf[..4]).unwrap();
        assert_eq!(source.release(mark), Some(vec![0; 4]));
    }

    #[test]
    fn into_parts_keeps_pending_bytes() {
        let mut source = RecordingSource::new(&b"abcdef"[..], 0);
        let _ = source.peek(3).unwrap();
        let (pending, rest) = source.into_parts();
        assert_eq!(pending, b"abc".to_vec());
        assert_eq!(rest, b"def");
    }
}
