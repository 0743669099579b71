use super::Reader;
use crate::{ChunkError, ParseError};
use thiserror::Error;

#[doc = r#"
An error raised while reading, with the absolute offset it was raised at.

For a malformed field the offset is just past the bytes that were read for
it. For a read that could not be satisfied it is where that read started.
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// What went wrong in a [`ReaderError`]
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The bytes do not form a valid file
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
    /// The input ended in the middle of a chunk, event or length prefix
    #[error("Unexpected end of input")]
    OutOfBounds,
    /// The underlying byte source failed
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderErrorKind {
    pub(crate) const fn chunk(chunk_err: ChunkError) -> Self {
        Self::ParseError(ParseError::Chunk(chunk_err))
    }

    /// Returns the parse error, if this is one
    pub const fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::ParseError(e) => Some(e),
            _ => None,
        }
    }
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// True if the input ended early
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }

    /// True if a read crossed the end of a track chunk
    pub const fn is_framing_mismatch(&self) -> bool {
        matches!(
            self.kind,
            ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::FramingMismatch { .. }))
        )
    }

    /// The error kind
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Consumes the error, returning its kind.
    pub fn into_kind(self) -> ReaderErrorKind {
        self.kind
    }

    /// Absolute byte offset into the input
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Result of every read operation (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

/// A parse error at the reader's current position.
pub(crate) fn inv_data<R>(reader: &Reader<R>, v: impl Into<ParseError>) -> ReaderError {
    ReaderError::new(
        reader.buffer_position(),
        ReaderErrorKind::ParseError(v.into()),
    )
}

#[test]
fn display_includes_position() {
    use crate::EventError;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    let err = ReaderError::new(12, ReaderErrorKind::OutOfBounds);
    assert_eq!(
        err.to_string(),
        "Reading at Position 12, Unexpected end of input"
    );

    let err: ReaderErrorKind = ParseError::from(EventError::MissingRunningStatus).into();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::Event(EventError::MissingRunningStatus))
    );
}
