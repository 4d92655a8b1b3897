//! Stream primitives the dispatcher probes through.
//!
//! Any `Read + Seek` value is an [`ImageStream`]. Memory input goes through
//! `std::io::Cursor<&[u8]>`, files through [`ReadAhead`], which keeps a
//! fixed window of the underlying stream so that the repeated
//! read-then-rewind pattern of probing never hits the file twice.

use std::io::{self, BufRead, Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

/// Window size used when loading from a path.
pub const READ_AHEAD_CAPACITY: usize = 8192;

/// A sequential byte source with a seekable cursor.
pub trait ImageStream: Read + Seek {}

impl<T: Read + Seek> ImageStream for T {}

/// Read up to `buf.len()` bytes, stopping early at end of stream.
///
/// Never fails: an I/O error ends the read like end of stream does. Returns
/// the number of bytes placed in `buf`.
pub fn read_prefix<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> usize {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
    filled
}

/// Seeks the wrapped stream back to a fixed position when dropped.
///
/// Holds the stream for the duration of one probe so the rewind happens on
/// every exit path, including early returns inside the probe.
pub struct RewindGuard<'a, S: Seek + ?Sized> {
    stream: &'a mut S,
    position: u64,
}

impl<'a, S: Seek + ?Sized> RewindGuard<'a, S> {
    /// Record the stream's current position.
    pub fn new(stream: &'a mut S) -> io::Result<Self> {
        let position = stream.stream_position()?;
        Ok(Self { stream, position })
    }

    /// Rewind to an already known `position` on drop.
    pub fn at(stream: &'a mut S, position: u64) -> Self {
        Self { stream, position }
    }

    /// Position restored on drop.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<S: Seek + ?Sized> Deref for RewindGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.stream
    }
}

impl<S: Seek + ?Sized> DerefMut for RewindGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.stream
    }
}

impl<S: Seek + ?Sized> Drop for RewindGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.stream.seek(SeekFrom::Start(self.position)) {
            log::warn!("failed to rewind stream to offset {}: {e}", self.position);
        }
    }
}

/// Read-ahead buffering adapter that owns its underlying stream.
///
/// Reads fill a window of `capacity` bytes at a time. Seeks that land inside
/// the current window only move the cursor; anything else drops the window
/// and seeks the inner stream. The inner stream is dropped (closed) together
/// with the adapter.
pub struct ReadAhead<R> {
    inner: R,
    buf: Box<[u8]>,
    /// Absolute offset of `buf[0]`; the inner stream sits at `start + filled`.
    start: u64,
    filled: usize,
    pos: usize,
}

impl<R: Read + Seek> ReadAhead<R> {
    /// Wrap `inner` with a [`READ_AHEAD_CAPACITY`] window.
    pub fn new(inner: R) -> io::Result<Self> {
        Self::with_capacity(READ_AHEAD_CAPACITY, inner)
    }

    /// Wrap `inner` with a window of `capacity` bytes (at least one).
    pub fn with_capacity(capacity: usize, mut inner: R) -> io::Result<Self> {
        let start = inner.stream_position()?;
        Ok(Self {
            inner,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            start,
            filled: 0,
            pos: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The wrapped stream. Its own position runs ahead of this adapter's.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    fn position(&self) -> u64 {
        self.start + self.pos as u64
    }

    fn window_end(&self) -> u64 {
        self.start + self.filled as u64
    }

    fn discard_window(&mut self, start: u64) {
        self.start = start;
        self.filled = 0;
        self.pos = 0;
    }
}

impl<R: Read + Seek> Read for ReadAhead<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        // Large reads on an exhausted window bypass it.
        if self.pos == self.filled && out.len() >= self.buf.len() {
            let n = self.inner.read(out)?;
            let end = self.window_end() + n as u64;
            self.discard_window(end);
            return Ok(n);
        }

        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<R: Read + Seek> BufRead for ReadAhead<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos == self.filled {
            let end = self.window_end();
            let n = self.inner.read(&mut self.buf)?;
            self.start = end;
            self.filled = n;
            self.pos = 0;
        }
        Ok(&self.buf[self.pos..self.filled])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.filled);
    }
}

impl<R: Read + Seek> Seek for ReadAhead<R> {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let absolute = match target {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => self.position().checked_add_signed(delta).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "invalid seek to a negative or overflowing position",
                )
            })?,
            SeekFrom::End(_) => {
                let offset = self.inner.seek(target)?;
                self.discard_window(offset);
                return Ok(offset);
            }
        };

        if absolute >= self.start && absolute <= self.window_end() {
            self.pos = (absolute - self.start) as usize;
        } else {
            self.inner.seek(SeekFrom::Start(absolute))?;
            self.discard_window(absolute);
        }
        Ok(absolute)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Counts calls that reach the wrapped stream.
    struct Counting<R> {
        inner: R,
        reads: usize,
        seeks: usize,
    }

    impl<R> Counting<R> {
        fn new(inner: R) -> Self {
            Self {
                inner,
                reads: 0,
                seeks: 0,
            }
        }
    }

    impl<R: Read> Read for Counting<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            self.inner.read(buf)
        }
    }

    impl<R: Seek> Seek for Counting<R> {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.seeks += 1;
            self.inner.seek(pos)
        }
    }

    fn data(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn read_prefix_stops_at_end() {
        let mut input = Cursor::new(&b"abc"[..]);
        let mut buf = [0u8; 8];
        assert_eq!(read_prefix(&mut input, &mut buf), 3);
        assert_eq!(&buf[..3], b"abc");
        assert_eq!(read_prefix(&mut input, &mut buf), 0);
    }

    #[test]
    fn rewind_guard_restores_position() {
        let mut input = Cursor::new(&b"0123456789"[..]);
        input.set_position(2);
        {
            let mut guard = RewindGuard::new(&mut input).unwrap();
            assert_eq!(guard.position(), 2);
            let mut buf = [0u8; 5];
            guard.read_exact(&mut buf).unwrap();
            assert_eq!(&buf, b"23456");
        }
        assert_eq!(input.position(), 2);
    }

    #[test]
    fn rewind_guard_at_explicit_position() {
        let mut input = Cursor::new(&b"0123456789"[..]);
        input.set_position(7);
        drop(RewindGuard::at(&mut input, 3));
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn read_ahead_reads_everything_in_order() {
        let bytes = data(20_000);
        let mut reader = ReadAhead::with_capacity(64, Cursor::new(bytes.clone())).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn rewind_inside_window_does_not_touch_inner() {
        let mut reader = ReadAhead::with_capacity(32, Counting::new(Cursor::new(data(100)))).unwrap();
        let seeks_before = reader.get_ref().seeks;

        let mut head = [0u8; 8];
        reader.read_exact(&mut head).unwrap();
        reader.seek(SeekFrom::Start(0)).unwrap();
        let mut again = [0u8; 8];
        reader.read_exact(&mut again).unwrap();

        assert_eq!(head, again);
        assert_eq!(reader.get_ref().reads, 1);
        assert_eq!(reader.get_ref().seeks, seeks_before);
        assert_eq!(reader.stream_position().unwrap(), 8);
    }

    #[test]
    fn seek_outside_window_refills() {
        let bytes = data(100);
        let mut reader = ReadAhead::with_capacity(16, Counting::new(Cursor::new(bytes.clone()))).unwrap();

        reader.seek(SeekFrom::Start(50)).unwrap();
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, &bytes[50..54]);

        reader.seek(SeekFrom::Current(-54)).unwrap();
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, &bytes[..4]);
        assert!(reader.seek(SeekFrom::Current(-10)).is_err());
    }

    #[test]
    fn seek_from_end() {
        let bytes = data(40);
        let mut reader = ReadAhead::with_capacity(16, Cursor::new(bytes.clone())).unwrap();
        assert_eq!(reader.seek(SeekFrom::End(-4)).unwrap(), 36);
        let mut tail = Vec::new();
        reader.read_to_end(&mut tail).unwrap();
        assert_eq!(tail, &bytes[36..]);
    }

    #[test]
    fn large_reads_bypass_window() {
        let bytes = data(256);
        let mut reader = ReadAhead::with_capacity(16, Counting::new(Cursor::new(bytes.clone()))).unwrap();
        let mut big = [0u8; 64];
        reader.read_exact(&mut big).unwrap();
        assert_eq!(&big[..], &bytes[..64]);
        assert_eq!(reader.get_ref().reads, 1);
        assert_eq!(reader.stream_position().unwrap(), 64);
    }

    #[test]
    fn starts_at_inner_position() {
        let mut inner = Cursor::new(data(32));
        inner.set_position(10);
        let mut reader = ReadAhead::new(inner).unwrap();
        assert_eq!(reader.capacity(), READ_AHEAD_CAPACITY);
        assert_eq!(reader.stream_position().unwrap(), 10);
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(buf[0], 10);
    }
}
