#![doc = r#"
Sequential, position-tracked access to MIDI bytes

# Overview

A [`Reader`] wraps any [`MidiSource`] and only ever moves forward. It counts
every byte it hands out, so errors can report exactly where in the input they
happened, and track parsing can tell when a chunk's declared length has been
consumed.

Reading from a byte slice is zero-copy: event payloads borrow the input.
Reading from a [`std::io::Read`] (through [`IoSource`]) copies payloads into
owned buffers.

# Example
```rust
# use smfkit::prelude::*;
let mut reader = Reader::from_byte_slice(&[0x81, 0x48, 0x02, 0x66, 0x66]);

assert_eq!(reader.read_varlen().unwrap(), 0xC8);
assert_eq!(reader.read_length_prefixed().unwrap().as_ref(), &[0x66, 0x66]);
assert_eq!(reader.buffer_position(), 5);
assert!(reader.read_next().unwrap_err().is_out_of_bounds());
```
"#]

mod error;
pub use error::*;

mod source;
pub use source::*;

use crate::{ChunkError, ChunkTag, events::TrackEvent, varlen};
use alloc::borrow::Cow;

/// Largest piece [`Reader::skip`] reads in one go.
pub const SKIP_STEP: usize = 4096;

/// A forward-only cursor over a [`MidiSource`].
pub struct Reader<R> {
    source: R,
    position: usize,
    bound: Option<Bound>,
}

#[derive(Clone, Copy)]
pub(crate) struct Bound {
    start: usize,
    declared: u32,
}

impl<R> Reader<R> {
    /// Create a reader over any source
    pub const fn new(source: R) -> Self {
        Self {
            source,
            position: 0,
            bound: None,
        }
    }

    /// The number of bytes consumed so far.
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Returns the wrapped source
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Limits reads to `declared` bytes from the current position.
    ///
    /// Returns the previous limit, which must be handed back to [`Self::restore_bound`].
    pub(crate) fn bound_to(&mut self, declared: u32) -> Option<Bound> {
        self.bound.replace(Bound {
            start: self.position,
            declared,
        })
    }

    pub(crate) fn restore_bound(&mut self, previous: Option<Bound>) {
        self.bound = previous;
    }

    /// Bytes left before the current limit, if there is one.
    pub(crate) fn remaining_in_bound(&self) -> Option<usize> {
        self.bound
            .map(|b| (b.start + b.declared as usize).saturating_sub(self.position))
    }

    fn check_bound(&self, len: usize) -> ReadResult<()> {
        let Some(bound) = self.bound else {
            return Ok(());
        };
        let attempted = self.position - bound.start + len;
        if attempted > bound.declared as usize {
            return Err(ReaderError::new(
                self.position,
                ReaderErrorKind::chunk(ChunkError::FramingMismatch {
                    declared: bound.declared,
                    attempted,
                }),
            ));
        }
        Ok(())
    }
}

impl<'slc> Reader<&'slc [u8]> {
    /// Create a zero-copy reader over a byte slice
    pub const fn from_byte_slice(bytes: &'slc [u8]) -> Self {
        Self::new(bytes)
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Reader<IoSource<R>> {
    /// Create a reader over anything implementing [`std::io::Read`]
    pub const fn from_io(read: R) -> Self {
        Self::new(IoSource::new(read))
    }
}

impl<'slc, R: MidiSource<'slc>> Reader<R> {
    /// Reads exactly `len` bytes.
    ///
    /// # Errors
    /// - [`ReaderErrorKind::OutOfBounds`] if the source holds fewer than `len` bytes
    /// - [`ChunkError::FramingMismatch`] if the read would cross the current chunk's end
    pub fn read_exact(&mut self, len: usize) -> ReadResult<Cow<'slc, [u8]>> {
        self.check_bound(len)?;
        match self.source.take(len) {
            Ok(bytes) => {
                self.position += len;
                Ok(bytes)
            }
            Err(kind) => Err(ReaderError::new(self.position, kind)),
        }
    }

    /// Reads a fixed number of bytes into an array
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let bytes = self.read_exact(N)?;
        let mut out = [0; N];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    /// Discards `len` bytes, reading at most [`SKIP_STEP`] of them at a time.
    pub fn skip(&mut self, mut len: usize) -> ReadResult<()> {
        while len > 0 {
            let step = len.min(SKIP_STEP);
            self.read_exact(step)?;
            len -= step;
        }
        Ok(())
    }

    /// Reads a single byte
    pub fn read_next(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size::<1>()?;
        Ok(byte)
    }

    /// Reads a big-endian u16
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian u32
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Reads a variable-length quantity. See [`varlen::read_varlen`].
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        varlen::read_varlen(self)
    }

    /// Reads a variable-length size followed by that many bytes.
    pub fn read_length_prefixed(&mut self) -> ReadResult<Cow<'slc, [u8]>> {
        varlen::read_length_prefixed(self)
    }

    /// Reads a chunk tag and length, failing if the tag is not `expected`.
    pub fn read_chunk_header(&mut self, expected: ChunkTag) -> ReadResult<u32> {
        let actual = ChunkTag(self.read_exact_size()?);
        if actual != expected {
            return Err(inv_data(
                self,
                ChunkError::TagMismatch { expected, actual },
            ));
        }
        self.read_u32()
    }

    /// Reads one event (without its delta time), updating `running_status`.
    ///
    /// See [`TrackEvent::read`].
    pub fn read_event(&mut self, running_status: &mut Option<u8>) -> ReadResult<TrackEvent<'slc>> {
        TrackEvent::read(self, running_status)
    }
}
