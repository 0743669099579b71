use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    EncodeError,
    reader::{MidiSource, ReadResult, Reader},
    varlen,
};
use alloc::{borrow::Cow, vec::Vec};

#[doc = r#"
The well-known meta event types.

This only names the type byte; the payload of a [`MetaEvent`] is never
interpreted. Types not listed here are still valid meta events.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetaKind {
    /// `FF 00 02`
    SequenceNumber = 0x00,
    /// `FF 01 len`
    Text = 0x01,
    /// `FF 02 len`
    Copyright = 0x02,
    /// `FF 03 len`
    TrackName = 0x03,
    /// `FF 04 len`
    InstrumentName = 0x04,
    /// `FF 05 len`
    Lyric = 0x05,
    /// `FF 06 len`
    Marker = 0x06,
    /// `FF 07 len`
    CuePoint = 0x07,
    /// `FF 20 01`
    ChannelPrefix = 0x20,
    /// `FF 2F 00`
    EndOfTrack = 0x2F,
    /// `FF 51 03`
    Tempo = 0x51,
    /// `FF 54 05`
    SmpteOffset = 0x54,
    /// `FF 58 04`
    TimeSignature = 0x58,
    /// `FF 59 02`
    KeySignature = 0x59,
    /// `FF 7F len`
    SequencerSpecific = 0x7F,
}

#[doc = r#"
A meta event (`0xFF`): a type byte and an opaque payload.

```text
FF  tt  len...  data...
    |   |
    |   variable-length quantity
    type
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaEvent<'a> {
    event_type: u8,
    data: Cow<'a, [u8]>,
}

impl<'a> MetaEvent<'a> {
    /// Every meta event's status byte
    pub const STATUS: u8 = 0xFF;

    /// Create a meta event
    pub fn new(event_type: u8, data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            event_type,
            data: data.into(),
        }
    }

    /// `FF 2F 00`
    pub const fn end_of_track() -> Self {
        Self {
            event_type: MetaKind::EndOfTrack as u8,
            data: Cow::Borrowed(&[]),
        }
    }

    /// Always `0xFF`
    pub const fn status(&self) -> u8 {
        Self::STATUS
    }

    /// The raw type byte
    pub const fn event_type(&self) -> u8 {
        self.event_type
    }

    /// The type, if it is one of the well-known ones
    pub fn kind(&self) -> Option<MetaKind> {
        MetaKind::try_from(self.event_type).ok()
    }

    /// True for `FF 2F`
    pub fn is_end_of_track(&self) -> bool {
        self.kind() == Some(MetaKind::EndOfTrack)
    }

    /// The payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Detach from the input buffer
    pub fn into_owned(self) -> MetaEvent<'static> {
        MetaEvent {
            event_type: self.event_type,
            data: Cow::Owned(self.data.into_owned()),
        }
    }

    /// Reads the type byte and payload that follow an `0xFF` status.
    pub(crate) fn read<R: MidiSource<'a>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let event_type = reader.read_next()?;
        let data = reader.read_length_prefixed()?;
        Ok(Self { event_type, data })
    }

    /// Writes the event, status byte included.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(&[Self::STATUS, self.event_type]);
        varlen::write_length_prefixed(out, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_meta_after_status() {
        let bytes = [0x01, 0x02, 0x66, 0x66, 0x10];
        let mut reader = Reader::from_byte_slice(&bytes);
        let event = MetaEvent::read(&mut reader).unwrap();
        assert_eq!(reader.buffer_position(), 4);
        assert_eq!(event, MetaEvent::new(0x01, &[0x66u8, 0x66][..]));
        assert_eq!(event.kind(), Some(MetaKind::Text));
        assert_eq!(event.status(), 0xFF);
    }

    #[test]
    fn equality_compares_type_and_data() {
        let a = MetaEvent::new(0x01, &b"hei"[..]);
        let b = MetaEvent::new(0x01, b"hei".to_vec());
        let c = MetaEvent::new(0x22, &b"hei"[..]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(c.kind(), None);
    }

    #[test]
    fn write_end_of_track() {
        let mut out = Vec::new();
        MetaEvent::end_of_track().write_to(&mut out).unwrap();
        assert_eq!(out, [0xFF, 0x2F, 0x00]);
        assert!(MetaEvent::end_of_track().is_end_of_track());
    }
}
