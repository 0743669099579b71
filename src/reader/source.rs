use super::ReaderErrorKind;
use alloc::borrow::Cow;

#[doc = r#"
A source of bytes for a [`Reader`](super::Reader).

A source hands out exactly the number of bytes asked for, or fails. Sources
that can lend out their contents for `'slc` return [`Cow::Borrowed`].
"#]
pub trait MidiSource<'slc> {
    /// Take exactly `len` bytes from the front of the source.
    ///
    /// Returns [`ReaderErrorKind::OutOfBounds`] if fewer than `len` bytes remain.
    fn take(&mut self, len: usize) -> Result<Cow<'slc, [u8]>, ReaderErrorKind>;
}

impl<'slc> MidiSource<'slc> for &'slc [u8] {
    #[inline]
    fn take(&mut self, len: usize) -> Result<Cow<'slc, [u8]>, ReaderErrorKind> {
        if len > self.len() {
            return Err(ReaderErrorKind::OutOfBounds);
        }
        let (taken, rest) = self.split_at(len);
        *self = rest;
        Ok(Cow::Borrowed(taken))
    }
}

/// Adapts a [`std::io::Read`] into a [`MidiSource`].
///
/// Every read is copied into an owned buffer.
#[cfg(feature = "std")]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R> IoSource<R> {
    /// Wrap a reader
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }
    /// Returns the wrapped reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> MidiSource<'static> for IoSource<R> {
    fn take(&mut self, len: usize) -> Result<Cow<'static, [u8]>, ReaderErrorKind> {
        use std::io::{ErrorKind, Read};

        // the buffer grows with the bytes that arrive, not with the declared length
        let mut buf = alloc::vec::Vec::new();
        match Read::take(&mut self.inner, len as u64).read_to_end(&mut buf) {
            Ok(read) if read == len => Ok(Cow::Owned(buf)),
            Ok(_) => Err(ReaderErrorKind::OutOfBounds),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(ReaderErrorKind::OutOfBounds),
            Err(e) => Err(ReaderErrorKind::Io(e)),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::reader::Reader;
    use pretty_assertions::assert_eq;

    #[test]
    fn io_source_reads_owned() {
        let bytes: &[u8] = &[0xFF, 0x01, 0x02];
        let mut reader = Reader::from_io(std::io::Cursor::new(bytes));
        let taken = reader.read_exact(2).unwrap();
        assert!(matches!(taken, Cow::Owned(_)));
        assert_eq!(taken.as_ref(), &[0xFF, 0x01]);
        assert!(reader.read_exact(2).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn declared_lengths_do_not_preallocate() {
        use crate::file::MidiFile;

        // header claiming nearly 4 GiB
        let err = MidiFile::from_io(&b"MThd\xFF\xFF\xFF\xF0\0\0\0\0\0\x60"[..]).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 14);

        // meta event claiming 0x0FFFFFFF bytes
        let bytes: &[u8] = &[0xFF, 0x01, 0xFF, 0xFF, 0xFF, 0x7F, 0x66];
        let mut reader = Reader::from_io(bytes);
        let err = reader.read_event(&mut None).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 6);
    }
}
