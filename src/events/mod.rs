#![doc = r#"
Track events and the running status state machine

# Hierarchy
```text
                    |------------|
                    | TrackEvent |
                    |------------|
                   /      |       \
|--------------|  |-----------|  |------------|
| ChannelEvent |  | MetaEvent |  | SysExEvent |
|--------------|  |-----------|  |------------|
   0x80-0xEF          0xFF         0xF0 / 0xF7
```

# Running status

Inside a track, a channel event may leave out its status byte if it is the
same as the previous event's. A reader tells the two cases apart by the top
bit of the first byte: status bytes have it set, data bytes never do.

The state carried between events is a single `Option<u8>`, which starts as
`None` at the top of every track and is replaced by each decoded event's
status. Meta and sysex statuses are recorded too, but only a channel status
can stand in for a missing one.
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod sysex;
pub use sysex::*;

use crate::{
    EncodeError, EventError,
    reader::{MidiSource, ReadResult, Reader, inv_data},
    varlen,
};
use alloc::vec::Vec;

/// MIDI timing clock. May appear anywhere a status byte is expected and is skipped.
pub const TIMING_CLOCK: u8 = 0xF8;

/// Whether serialization may leave out repeated channel status bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMode {
    /// Omit a channel event's status byte when it equals the previous event's
    #[default]
    Running,
    /// Write every status byte
    Explicit,
}

/// Any event that can appear in a track chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackEvent<'a> {
    /// A channel voice event
    Channel(ChannelEvent),
    /// A meta event
    Meta(MetaEvent<'a>),
    /// A system exclusive event
    SysEx(SysExEvent<'a>),
}

impl<'a> TrackEvent<'a> {
    /// The status byte of the event, as carried into running status.
    pub const fn status(&self) -> u8 {
        match self {
            Self::Channel(c) => c.status(),
            Self::Meta(m) => m.status(),
            Self::SysEx(s) => s.status(),
        }
    }

    /// Reads one event, skipping any timing clock bytes before its status.
    ///
    /// `running_status` is the status of the previous event in the track
    /// (`None` for the first), and is updated to this event's status.
    pub fn read<R: MidiSource<'a>>(
        reader: &mut Reader<R>,
        running_status: &mut Option<u8>,
    ) -> ReadResult<Self> {
        let mut status = reader.read_next()?;
        while status == TIMING_CLOCK {
            #[cfg(feature = "tracing")]
            tracing::trace!("skipping timing clock at {}", reader.buffer_position() - 1);
            status = reader.read_next()?;
        }
        Self::read_with_status(reader, status, running_status)
    }

    /// Decodes the rest of an event whose leading byte has already been read.
    ///
    /// # Errors
    /// - [`EventError::MissingRunningStatus`] if `status` is a data byte and
    ///   `running_status` does not hold a channel status
    /// - [`EventError::UnexpectedStatus`] for system common and realtime bytes
    pub fn read_with_status<R: MidiSource<'a>>(
        reader: &mut Reader<R>,
        status: u8,
        running_status: &mut Option<u8>,
    ) -> ReadResult<Self> {
        let event = match status {
            0xFF => Self::Meta(MetaEvent::read(reader)?),
            SysExEvent::START | SysExEvent::ESCAPE => Self::SysEx(SysExEvent::read(reader, status)?),
            0x80..=0xEF => Self::Channel(ChannelEvent::read_params(reader, status, None)?),
            0x00..=0x7F => {
                let Some(running @ 0x80..=0xEF) = *running_status else {
                    return Err(inv_data(reader, EventError::MissingRunningStatus));
                };
                Self::Channel(ChannelEvent::read_params(reader, running, Some(status))?)
            }
            _ => return Err(inv_data(reader, EventError::UnexpectedStatus(status))),
        };
        *running_status = Some(event.status());
        Ok(event)
    }

    /// Writes the event.
    ///
    /// A channel event's status byte is left out if it equals `running_status`,
    /// which is then updated to this event's status.
    pub fn write_to(
        &self,
        out: &mut Vec<u8>,
        running_status: &mut Option<u8>,
    ) -> Result<(), EncodeError> {
        match self {
            Self::Channel(c) => c.write_to(out, *running_status),
            Self::Meta(m) => m.write_to(out)?,
            Self::SysEx(s) => s.write_to(out)?,
        }
        *running_status = Some(self.status());
        Ok(())
    }

    /// Serializes the event on its own, status byte included.
    pub fn serialize(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.write_to(&mut out, &mut None)?;
        Ok(out)
    }

    /// Detach from the input buffer
    pub fn into_owned(self) -> TrackEvent<'static> {
        match self {
            Self::Channel(c) => TrackEvent::Channel(c),
            Self::Meta(m) => TrackEvent::Meta(m.into_owned()),
            Self::SysEx(s) => TrackEvent::SysEx(s.into_owned()),
        }
    }
}

impl From<ChannelEvent> for TrackEvent<'_> {
    fn from(value: ChannelEvent) -> Self {
        Self::Channel(value)
    }
}

impl<'a> From<MetaEvent<'a>> for TrackEvent<'a> {
    fn from(value: MetaEvent<'a>) -> Self {
        Self::Meta(value)
    }
}

impl<'a> From<SysExEvent<'a>> for TrackEvent<'a> {
    fn from(value: SysExEvent<'a>) -> Self {
        Self::SysEx(value)
    }
}

#[doc = r#"
A [`TrackEvent`] with the number of ticks since the previous event in its track.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeltaEvent<'a> {
    delta_ticks: u32,
    event: TrackEvent<'a>,
}

impl<'a> DeltaEvent<'a> {
    /// Create a delta event
    pub fn new(delta_ticks: u32, event: impl Into<TrackEvent<'a>>) -> Self {
        Self {
            delta_ticks,
            event: event.into(),
        }
    }

    /// Ticks since the previous event
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The event
    pub const fn event(&self) -> &TrackEvent<'a> {
        &self.event
    }

    /// Returns the delta ticks and event
    pub fn into_parts(self) -> (u32, TrackEvent<'a>) {
        (self.delta_ticks, self.event)
    }

    /// Detach from the input buffer
    pub fn into_owned(self) -> DeltaEvent<'static> {
        DeltaEvent {
            delta_ticks: self.delta_ticks,
            event: self.event.into_owned(),
        }
    }

    /// Reads a delta time followed by an event.
    pub fn read<R: MidiSource<'a>>(
        reader: &mut Reader<R>,
        running_status: &mut Option<u8>,
    ) -> ReadResult<Self> {
        let delta_ticks = reader.read_varlen()?;
        let event = TrackEvent::read(reader, running_status)?;
        Ok(Self { delta_ticks, event })
    }

    /// Writes the delta time and event.
    pub fn write_to(
        &self,
        out: &mut Vec<u8>,
        running_status: &mut Option<u8>,
    ) -> Result<(), EncodeError> {
        varlen::write_varlen(out, self.delta_ticks)?;
        self.event.write_to(out, running_status)
    }
}
