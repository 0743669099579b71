use crate::{
    ChunkTag, EncodeError,
    events::{DeltaEvent, StatusMode, TrackEvent},
    reader::{MidiSource, ReadResult, Reader},
};
use alloc::vec::Vec;

#[doc = r#"
An `MTrk` chunk: an ordered list of events, each with its delta time.

Running status is only used while reading or writing a track. It is not
part of the track, and every track starts without one.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track<'a> {
    events: Vec<DeltaEvent<'a>>,
}

impl<'a> Track<'a> {
    /// Create a track from its events
    pub fn new(events: Vec<DeltaEvent<'a>>) -> Self {
        Self { events }
    }

    /// The events, in order
    pub fn events(&self) -> &[DeltaEvent<'a>] {
        &self.events
    }

    /// Iterates over the events without their delta times
    pub fn iter_events(&self) -> impl Iterator<Item = &TrackEvent<'a>> {
        self.events.iter().map(DeltaEvent::event)
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if there are no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Appends an event
    pub fn push(&mut self, event: DeltaEvent<'a>) {
        self.events.push(event);
    }

    /// Returns the events
    pub fn into_events(self) -> Vec<DeltaEvent<'a>> {
        self.events
    }

    /// Detach from the input buffer
    pub fn into_owned(self) -> Track<'static> {
        Track {
            events: self.events.into_iter().map(DeltaEvent::into_owned).collect(),
        }
    }

    /// Reads an `MTrk` chunk.
    ///
    /// Events are decoded until exactly the declared number of bytes has been consumed.
    /// Any read that would cross the end of the chunk fails with
    /// [`ChunkError::FramingMismatch`](crate::ChunkError::FramingMismatch).
    pub fn read<R: MidiSource<'a>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let declared = reader.read_chunk_header(ChunkTag::TRACK)?;

        let outer = reader.bound_to(declared);
        let events = Self::read_events(reader);
        reader.restore_bound(outer);
        let events = events?;

        #[cfg(feature = "tracing")]
        tracing::trace!(declared, events = events.len(), "parsed MTrk chunk");

        Ok(Self { events })
    }

    fn read_events<R: MidiSource<'a>>(reader: &mut Reader<R>) -> ReadResult<Vec<DeltaEvent<'a>>> {
        let mut events = Vec::new();
        let mut running_status = None;
        while reader.remaining_in_bound() != Some(0) {
            events.push(DeltaEvent::read(reader, &mut running_status)?);
        }
        Ok(events)
    }

    /// Writes the whole `MTrk` chunk.
    pub fn write_to(&self, out: &mut Vec<u8>, mode: StatusMode) -> Result<(), EncodeError> {
        out.extend_from_slice(&ChunkTag::TRACK.bytes());
        let length_at = out.len();
        out.extend_from_slice(&[0; 4]);

        let body_start = out.len();
        let mut running_status = None;
        for event in &self.events {
            if mode == StatusMode::Explicit {
                running_status = None;
            }
            event.write_to(out, &mut running_status)?;
        }

        let body_len = out.len() - body_start;
        let length = u32::try_from(body_len).map_err(|_| EncodeError::ChunkTooLarge(body_len))?;
        out[length_at..body_start].copy_from_slice(&length.to_be_bytes());
        Ok(())
    }
}

impl<'a> FromIterator<DeltaEvent<'a>> for Track<'a> {
    fn from_iter<T: IntoIterator<Item = DeltaEvent<'a>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ChunkError, ParseError,
        events::{Channel, ChannelEvent, MetaEvent},
        reader::ReaderErrorKind,
    };
    use pretty_assertions::assert_eq;

    fn sample_track() -> Track<'static> {
        [
            DeltaEvent::new(0, MetaEvent::new(0x03, &b"Lead"[..])),
            DeltaEvent::new(0, ChannelEvent::program_change(Channel::One, 81).unwrap()),
            DeltaEvent::new(0, ChannelEvent::note_on(Channel::One, 64, 90).unwrap()),
            DeltaEvent::new(192, ChannelEvent::note_on(Channel::One, 64, 0).unwrap()),
            DeltaEvent::new(0, ChannelEvent::note_on(Channel::One, 67, 90).unwrap()),
            DeltaEvent::new(192, ChannelEvent::note_off(Channel::One, 67, 0).unwrap()),
            DeltaEvent::new(0, MetaEvent::end_of_track()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reads_until_declared_length() {
        let bytes = [
            b'M', b'T', b'r', b'k', 0x00, 0x00, 0x00, 0x0C, //
            0x00, 0x90, 0x3C, 0x40, //
            0x60, 0x3C, 0x00, //
            0x00, 0xF0, 0x00, //
            0x00, 0xC1, 0x05, // the last byte lies past a 12 byte chunk
            0xFF,
        ];
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = Track::read(&mut reader).unwrap_err();
        assert!(err.is_framing_mismatch());

        let mut fixed = bytes;
        fixed[7] = 0x0D;
        let mut reader = Reader::from_byte_slice(&fixed);
        let track = Track::read(&mut reader).unwrap();
        assert_eq!(track.len(), 4);
        assert_eq!(reader.buffer_position(), 8 + 13);
        assert_eq!(
            track.events()[1],
            DeltaEvent::new(0x60, ChannelEvent::note_on(Channel::One, 0x3C, 0x00).unwrap())
        );
    }

    #[test]
    fn one_byte_short_is_framing_mismatch() {
        // two note ons are 8 bytes; declare 7
        let bytes = [
            b'M', b'T', b'r', b'k', 0x00, 0x00, 0x00, 0x07, //
            0x00, 0x90, 0x3C, 0x40, //
            0x00, 0x90, 0x3E, 0x40,
        ];
        let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::FramingMismatch {
                declared: 7,
                attempted: 8
            }))
        ));
        assert_eq!(err.position(), 15);
    }

    #[test]
    fn running_status_resets_per_track() {
        let bytes = [
            b'M', b'T', b'r', b'k', 0x00, 0x00, 0x00, 0x04, //
            0x00, 0x90, 0x3C, 0x40, //
            b'M', b'T', b'r', b'k', 0x00, 0x00, 0x00, 0x03, //
            0x00, 0x3C, 0x40,
        ];
        let mut reader = Reader::from_byte_slice(&bytes);
        Track::read(&mut reader).unwrap();
        let err = Track::read(&mut reader).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Event(crate::EventError::MissingRunningStatus))
        ));
    }

    #[test]
    fn empty_track() {
        let bytes = *b"MTrk\x00\x00\x00\x00";
        let track = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
        assert!(track.is_empty());

        let mut out = Vec::new();
        track.write_to(&mut out, StatusMode::Running).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn write_modes_round_trip() {
        let track = sample_track();

        let mut running = Vec::new();
        track.write_to(&mut running, StatusMode::Running).unwrap();
        let mut explicit = Vec::new();
        track.write_to(&mut explicit, StatusMode::Explicit).unwrap();

        // the second and third note on share the first one's status
        assert_eq!(explicit.len() - running.len(), 2);

        for bytes in [&running, &explicit] {
            let mut reader = Reader::from_byte_slice(bytes);
            assert_eq!(Track::read(&mut reader).unwrap(), track);
            assert_eq!(reader.buffer_position(), bytes.len());
        }
    }
}
