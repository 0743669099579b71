use core::fmt;

use thiserror::Error;

#[doc = r#"
An error produced while interpreting MIDI bytes.

Every variant is fatal to the parse that produced it.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A data byte (or a value meant to become one) was above 127.
    #[error("Value {0} is out of range for a data byte (0-127)")]
    ValueOutOfRange(u8),
    /// A channel number was above 15.
    #[error("Channel {0} is out of range (0-15)")]
    InvalidChannel(u8),
    /// A variable-length quantity did not terminate within four bytes.
    #[error("Variable-length quantity exceeds 28 bits")]
    IntegerOverflow,
    /// Chunk framing errors
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// Header errors
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// Event errors
    #[error("Event: {0}")]
    Event(#[from] EventError),
}

/// The four ascii bytes identifying a chunk.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    /// `MThd`
    pub const HEADER: Self = Self(*b"MThd");
    /// `MTrk`
    pub const TRACK: Self = Self(*b"MTrk");

    /// Returns the raw tag bytes
    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02X}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag(\"{self}\")")
    }
}

/// Errors in the chunk-level framing of a file
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// The chunk identifier did not match the chunk that was expected next.
    #[error("Expected chunk {expected}, found {actual}")]
    TagMismatch {
        /// The tag the reader required
        expected: ChunkTag,
        /// The tag that was read
        actual: ChunkTag,
    },
    /// An event would have read past the end of its track chunk.
    #[error("Event extends past the chunk boundary: chunk declares {declared} bytes, read would reach {attempted}")]
    FramingMismatch {
        /// Length declared in the chunk header
        declared: u32,
        /// Number of chunk bytes the failed read would have consumed
        attempted: usize,
    },
}

/// Errors in the `MThd` header
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// The format was not 0, 1 or 2
    #[error("Invalid format type {0}")]
    InvalidFormat(u16),
    /// The header chunk is too short to hold its three fields
    #[error("Header chunk length {0} is shorter than 6 bytes")]
    Length(u32),
    /// The SMPTE frame rate in the time division is not -24, -25, -29 or -30
    #[error("Invalid SMPTE frame rate {0}")]
    SmpteFps(i8),
}

/// Errors while decoding a single track event
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// A data byte appeared where a status byte was needed, and no channel status was in effect.
    #[error("Data byte found with no running status in effect")]
    MissingRunningStatus,
    /// A system common or realtime status byte, which cannot appear in a file.
    #[error("Unexpected status byte {0:#04X}")]
    UnexpectedStatus(u8),
    /// A system exclusive event was given a status other than `0xF0` or `0xF7`.
    #[error("Invalid system exclusive status {0:#04X}")]
    InvalidSysExStatus(u8),
    /// A channel event was built with the wrong number of parameters for its kind.
    #[error("Expected {expected} parameters, found {found}")]
    ParamCount {
        /// Parameters the kind takes
        expected: usize,
        /// Parameters given
        found: usize,
    },
    /// A channel event's kind has no parameter at this index.
    #[error("No parameter at index {0}")]
    NoSuchParam(usize),
}

#[doc = r#"
An error produced while serializing MIDI data.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The value does not fit in a four byte variable-length quantity.
    #[error("{0:#X} cannot be encoded as a variable-length quantity (max 0x0FFFFFFF)")]
    IntegerOverflow(u64),
    /// A track body is longer than a chunk length can express.
    #[error("Track of {0} bytes exceeds the maximum chunk length")]
    ChunkTooLarge(usize),
    /// The header's track count is a u16.
    #[error("{0} tracks cannot be declared in a header")]
    TooManyTracks(usize),
}

#[test]
fn chunk_tag_display() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    assert_eq!(ChunkTag::TRACK.to_string(), "MTrk");
    assert_eq!(ChunkTag([b'R', b'I', 0x00, b'F']).to_string(), "RI\\x00F");

    let err = ChunkError::TagMismatch {
        expected: ChunkTag::HEADER,
        actual: ChunkTag(*b"RIFF"),
    };
    assert_eq!(err.to_string(), "Expected chunk MThd, found RIFF");
}
