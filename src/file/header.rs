use crate::{
    ChunkTag, HeaderError,
    file::{FormatType, Timing},
    reader::{MidiSource, ReadResult, Reader, inv_data},
};
use alloc::vec::Vec;

const HEADER_LENGTH: u32 = 6;

#[doc = r#"
The contents of the `MThd` chunk.

```text
4D 54 68 64  00 00 00 06  ff ff  nn nn  dd dd
"MThd"       length       format tracks division
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    format: FormatType,
    track_count: u16,
    time_division: u16,
}

impl Header {
    /// Create a new header
    pub const fn new(format: FormatType, track_count: u16, time_division: u16) -> Self {
        Self {
            format,
            track_count,
            time_division,
        }
    }

    /// The file format
    pub const fn format_type(&self) -> FormatType {
        self.format
    }

    /// The number of track chunks the header declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// The raw time division
    pub const fn time_division(&self) -> u16 {
        self.time_division
    }

    /// Splits the time division into its timing representation
    pub const fn timing(&self) -> Result<Timing, HeaderError> {
        Timing::from_division(self.time_division)
    }

    /// Reads an `MThd` chunk.
    ///
    /// Bytes past the first six are skipped.
    pub fn read<'slc, R: MidiSource<'slc>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let length = reader.read_chunk_header(ChunkTag::HEADER)?;
        if length < HEADER_LENGTH {
            return Err(inv_data(reader, HeaderError::Length(length)));
        }
        let format = reader.read_u16()?;
        let track_count = reader.read_u16()?;
        let time_division = reader.read_u16()?;

        let format = FormatType::from_u16(format).map_err(|e| inv_data(reader, e))?;

        if length > HEADER_LENGTH {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Header chunk declares {} bytes; skipping {} unknown trailing bytes",
                length,
                length - HEADER_LENGTH
            );
            reader.skip((length - HEADER_LENGTH) as usize)?;
        }

        if format == FormatType::SingleMultiChannel && track_count != 1 {
            #[cfg(feature = "tracing")]
            tracing::warn!("Format 0 file declares {} tracks instead of 1", track_count);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?format, track_count, time_division, "parsed MThd header");

        Ok(Self {
            format,
            track_count,
            time_division,
        })
    }

    /// Writes the whole `MThd` chunk.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&ChunkTag::HEADER.bytes());
        out.extend_from_slice(&HEADER_LENGTH.to_be_bytes());
        out.extend_from_slice(&self.format.as_u16().to_be_bytes());
        out.extend_from_slice(&self.track_count.to_be_bytes());
        out.extend_from_slice(&self.time_division.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseError, reader::ReaderErrorKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn read_header() {
        let bytes = [
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x60,
        ];
        let mut reader = Reader::from_byte_slice(&bytes);
        let header = Header::read(&mut reader).unwrap();
        assert_eq!(header.format_type(), FormatType::Simultaneous);
        assert_eq!(header.track_count(), 2);
        assert_eq!(header.time_division(), 0x0060);
        assert_eq!(header.timing(), Ok(Timing::TicksPerQuarterNote(96)));
        assert_eq!(reader.buffer_position(), 14);

        let mut out = Vec::new();
        header.write_to(&mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    fn invalid_format() {
        let bytes = [
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x03, 0x00, 0x01, 0x00, 0x60,
        ];
        let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Header(HeaderError::InvalidFormat(3)))
        ));
    }

    #[test]
    fn short_header() {
        let bytes = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01];
        let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Header(HeaderError::Length(4)))
        ));
    }

    #[test]
    fn long_header_is_skipped() {
        let bytes = [
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0,
            0xAA, 0xBB, 0x4D,
        ];
        let mut reader = Reader::from_byte_slice(&bytes);
        let header = Header::read(&mut reader).unwrap();
        assert_eq!(header.time_division(), 0x01E0);
        assert_eq!(reader.buffer_position(), 16);
    }
}
