#![doc = r#"
Channel voice events

# Layout

A channel event's status byte packs two nibbles: the high nibble selects the
kind of event and the low nibble selects one of sixteen channels.

```text
1kkk cccc  0ppp pppp  [0ppp pppp]
 |    |     |          |
 kind |     param 1    param 2 (absent for 0xC_ and 0xD_)
      channel
```

How many parameters follow is decided by the kind alone, through a fixed
table of [`ChannelEventDescriptor`]s.
"#]

use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    DataByte, EventError, ParseError,
    reader::{MidiSource, ReadResult, Reader, inv_data},
};
use alloc::vec::Vec;

/// One of the sixteen MIDI channels.
///
/// On the wire, [`Channel::One`] is `0` and [`Channel::Sixteen`] is `15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// Create a channel from its wire number (0-15)
    pub fn new(number: u8) -> Result<Self, ParseError> {
        Self::try_from(number).map_err(|e| ParseError::InvalidChannel(e.number))
    }

    /// The channel encoded in the low nibble of a status byte
    pub fn from_status(status: u8) -> Self {
        // the low nibble is always a valid channel
        Self::try_from(status & 0x0F).unwrap_or(Self::One)
    }

    /// The wire number of this channel (0-15)
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// The kind of a channel event, keyed by the high nibble of its status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChannelEventKind {
    /// `0x8_`: note, velocity
    NoteOff = 0x8,
    /// `0x9_`: note, velocity
    NoteOn = 0x9,
    /// `0xA_`: note, amount
    NoteAftertouch = 0xA,
    /// `0xB_`: controller, value
    Controller = 0xB,
    /// `0xC_`: program
    ProgramChange = 0xC,
    /// `0xD_`: amount
    ChannelAftertouch = 0xD,
    /// `0xE_`: least significant 7 bits, most significant 7 bits
    PitchBend = 0xE,
}

/// Static information about a [`ChannelEventKind`].
#[derive(Debug, PartialEq, Eq)]
pub struct ChannelEventDescriptor {
    /// The kind this entry describes
    pub kind: ChannelEventKind,
    /// Parameter names, in wire order
    pub param_names: &'static [&'static str],
}

impl ChannelEventDescriptor {
    /// How many data bytes follow the status byte
    pub const fn param_count(&self) -> usize {
        self.param_names.len()
    }
}

/// Indexed by `nibble - 0x8`.
static DESCRIPTORS: [ChannelEventDescriptor; 7] = [
    ChannelEventDescriptor {
        kind: ChannelEventKind::NoteOff,
        param_names: &["note", "velocity"],
    },
    ChannelEventDescriptor {
        kind: ChannelEventKind::NoteOn,
        param_names: &["note", "velocity"],
    },
    ChannelEventDescriptor {
        kind: ChannelEventKind::NoteAftertouch,
        param_names: &["note", "amount"],
    },
    ChannelEventDescriptor {
        kind: ChannelEventKind::Controller,
        param_names: &["controller", "value"],
    },
    ChannelEventDescriptor {
        kind: ChannelEventKind::ProgramChange,
        param_names: &["program"],
    },
    ChannelEventDescriptor {
        kind: ChannelEventKind::ChannelAftertouch,
        param_names: &["amount"],
    },
    ChannelEventDescriptor {
        kind: ChannelEventKind::PitchBend,
        param_names: &["lsb", "msb"],
    },
];

impl ChannelEventKind {
    /// Looks up the kind for a status byte (`0x80..=0xEF`).
    pub fn from_status(status: u8) -> Option<Self> {
        Self::try_from(status >> 4).ok()
    }

    /// The high nibble of this kind's status bytes
    #[inline]
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// This kind's entry in the descriptor table
    pub fn descriptor(self) -> &'static ChannelEventDescriptor {
        &DESCRIPTORS[(self.nibble() - 0x8) as usize]
    }

    /// How many data bytes follow the status byte
    pub fn param_count(self) -> usize {
        self.descriptor().param_count()
    }

    /// Parameter names, in wire order
    pub fn param_names(self) -> &'static [&'static str] {
        self.descriptor().param_names
    }

    /// The position of a named parameter
    pub fn param_index(self, name: &str) -> Option<usize> {
        self.param_names().iter().position(|n| *n == name)
    }
}

#[doc = r#"
A channel voice event: a kind, a channel, and one or two data bytes.

Parameters are always in `0..=127`; every constructor and setter checks this.

# Example
```rust
# use smfkit::prelude::*;
let mut event = ChannelEvent::note_on(Channel::Three, 60, 100).unwrap();
assert_eq!(event.status(), 0x92);
assert_eq!(event.params(), &[60u8, 100]);

event.set_param(1, 64).unwrap();
assert_eq!(event.param_named("velocity").map(|v| v.value()), Some(64));

assert!(event.set_param(1, 128).is_err());
```
"#]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelEvent {
    kind: ChannelEventKind,
    channel: Channel,
    // unused trailing slots stay zero so derived equality only sees real params
    params: [DataByte; 2],
}

impl ChannelEvent {
    /// Create an event of any kind from raw parameter bytes.
    ///
    /// # Errors
    /// - [`EventError::ParamCount`] if `params` does not hold exactly
    ///   [`ChannelEventKind::param_count`] bytes
    /// - [`ParseError::ValueOutOfRange`] if any byte is above 127
    pub fn new(kind: ChannelEventKind, channel: Channel, params: &[u8]) -> Result<Self, ParseError> {
        let expected = kind.param_count();
        if params.len() != expected {
            return Err(EventError::ParamCount {
                expected,
                found: params.len(),
            }
            .into());
        }
        let mut data = [DataByte::default(); 2];
        for (slot, byte) in data.iter_mut().zip(params) {
            *slot = DataByte::new(*byte)?;
        }
        Ok(Self {
            kind,
            channel,
            params: data,
        })
    }

    fn two(kind: ChannelEventKind, channel: Channel, a: u8, b: u8) -> Result<Self, ParseError> {
        Ok(Self {
            kind,
            channel,
            params: [DataByte::new(a)?, DataByte::new(b)?],
        })
    }

    fn one(kind: ChannelEventKind, channel: Channel, a: u8) -> Result<Self, ParseError> {
        Ok(Self {
            kind,
            channel,
            params: [DataByte::new(a)?, DataByte::default()],
        })
    }

    /// `0x8_` Note Off
    pub fn note_off(channel: Channel, note: u8, velocity: u8) -> Result<Self, ParseError> {
        Self::two(ChannelEventKind::NoteOff, channel, note, velocity)
    }
    /// `0x9_` Note On
    pub fn note_on(channel: Channel, note: u8, velocity: u8) -> Result<Self, ParseError> {
        Self::two(ChannelEventKind::NoteOn, channel, note, velocity)
    }
    /// `0xA_` Polyphonic (per-note) aftertouch
    pub fn note_aftertouch(channel: Channel, note: u8, amount: u8) -> Result<Self, ParseError> {
        Self::two(ChannelEventKind::NoteAftertouch, channel, note, amount)
    }
    /// `0xB_` Control change
    pub fn controller(channel: Channel, controller: u8, value: u8) -> Result<Self, ParseError> {
        Self::two(ChannelEventKind::Controller, channel, controller, value)
    }
    /// `0xC_` Program change
    pub fn program_change(channel: Channel, program: u8) -> Result<Self, ParseError> {
        Self::one(ChannelEventKind::ProgramChange, channel, program)
    }
    /// `0xD_` Channel-wide aftertouch
    pub fn channel_aftertouch(channel: Channel, amount: u8) -> Result<Self, ParseError> {
        Self::one(ChannelEventKind::ChannelAftertouch, channel, amount)
    }
    /// `0xE_` Pitch bend, as its two 7-bit halves
    pub fn pitch_bend(channel: Channel, lsb: u8, msb: u8) -> Result<Self, ParseError> {
        Self::two(ChannelEventKind::PitchBend, channel, lsb, msb)
    }

    /// The kind of event
    #[inline]
    pub const fn kind(&self) -> ChannelEventKind {
        self.kind
    }

    /// The channel the event is addressed to
    #[inline]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The status byte: `(kind << 4) | channel`
    #[inline]
    pub const fn status(&self) -> u8 {
        (self.kind.nibble() << 4) | self.channel.number()
    }

    /// The parameters, in wire order
    pub fn params(&self) -> &[DataByte] {
        &self.params[..self.kind.param_count()]
    }

    /// A parameter by position
    pub fn param(&self, index: usize) -> Option<DataByte> {
        self.params().get(index).copied()
    }

    /// A parameter by its name in the kind's descriptor
    pub fn param_named(&self, name: &str) -> Option<DataByte> {
        self.param(self.kind.param_index(name)?)
    }

    /// Overwrite a parameter.
    ///
    /// # Errors
    /// - [`EventError::NoSuchParam`] if the kind has no parameter at `index`
    /// - [`ParseError::ValueOutOfRange`] if `value` is above 127
    pub fn set_param(&mut self, index: usize, value: u8) -> Result<(), ParseError> {
        if index >= self.kind.param_count() {
            return Err(EventError::NoSuchParam(index).into());
        }
        self.params[index] = DataByte::new(value)?;
        Ok(())
    }

    /// Change the channel
    pub fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    /// Reads the parameters of an event whose status is already known.
    ///
    /// `first` is the data byte that was read in place of a status byte under running status.
    pub(crate) fn read_params<'slc, R: MidiSource<'slc>>(
        reader: &mut Reader<R>,
        status: u8,
        first: Option<u8>,
    ) -> ReadResult<Self> {
        let Some(kind) = ChannelEventKind::from_status(status) else {
            return Err(inv_data(reader, EventError::UnexpectedStatus(status)));
        };
        let mut params = [DataByte::default(); 2];
        for (i, slot) in params.iter_mut().take(kind.param_count()).enumerate() {
            let byte = match (i, first) {
                (0, Some(byte)) => byte,
                _ => reader.read_next()?,
            };
            *slot = DataByte::new(byte).map_err(|e| inv_data(reader, e))?;
        }
        Ok(Self {
            kind,
            channel: Channel::from_status(status),
            params,
        })
    }

    /// Writes the event, omitting the status byte if it equals `running_status`.
    pub fn write_to(&self, out: &mut Vec<u8>, running_status: Option<u8>) {
        let status = self.status();
        if running_status != Some(status) {
            out.push(status);
        }
        out.extend(self.params().iter().map(|p| p.value()));
    }
}

impl fmt::Debug for ChannelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ChannelEvent");
        s.field("kind", &self.kind).field("channel", &self.channel);
        for (name, value) in self.kind.param_names().iter().zip(self.params()) {
            s.field(name, value);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_shifts_before_combining() {
        let event = ChannelEvent::note_off(Channel::Sixteen, 0x40, 0x00).unwrap();
        assert_eq!(event.status(), 0x8F);
        let event = ChannelEvent::pitch_bend(Channel::Three, 0x00, 0x40).unwrap();
        assert_eq!(event.status(), 0xE2);
    }

    #[test]
    fn descriptor_table_matches_kinds() {
        for nibble in 0x8u8..=0xE {
            let kind = ChannelEventKind::try_from(nibble).unwrap();
            assert_eq!(kind.descriptor().kind, kind);
            let expected = if matches!(nibble, 0xC | 0xD) { 1 } else { 2 };
            assert_eq!(kind.param_count(), expected, "{kind:?}");
        }
        assert!(ChannelEventKind::try_from(0x7u8).is_err());
        assert!(ChannelEventKind::try_from(0xFu8).is_err());
    }

    #[test]
    fn constructors_validate_params() {
        assert_eq!(
            ChannelEvent::note_on(Channel::One, 128, 0),
            Err(ParseError::ValueOutOfRange(128))
        );
        assert_eq!(
            ChannelEvent::new(ChannelEventKind::ProgramChange, Channel::One, &[1, 2]),
            Err(ParseError::Event(EventError::ParamCount {
                expected: 1,
                found: 2
            }))
        );
        let event = ChannelEvent::new(ChannelEventKind::ProgramChange, Channel::Ten, &[5]).unwrap();
        assert_eq!(event, ChannelEvent::program_change(Channel::Ten, 5).unwrap());
        assert_eq!(event.params(), &[5u8]);
    }

    #[test]
    fn setters_revalidate() {
        let mut event = ChannelEvent::controller(Channel::One, 7, 100).unwrap();
        assert_eq!(event.set_param(1, 128), Err(ParseError::ValueOutOfRange(128)));
        assert_eq!(event.param_named("value").unwrap().value(), 100);

        event.set_param(1, 127).unwrap();
        assert_eq!(event.param(1).unwrap().value(), 127);

        let mut program = ChannelEvent::program_change(Channel::One, 0).unwrap();
        assert_eq!(
            program.set_param(1, 0),
            Err(ParseError::Event(EventError::NoSuchParam(1)))
        );
    }

    #[test]
    fn channel_numbers() {
        assert_eq!(Channel::new(0).unwrap(), Channel::One);
        assert_eq!(Channel::new(15).unwrap(), Channel::Sixteen);
        assert_eq!(Channel::new(16), Err(ParseError::InvalidChannel(16)));
        assert_eq!(Channel::from_status(0x9A), Channel::Eleven);
    }

    #[test]
    fn write_elides_matching_status() {
        let event = ChannelEvent::note_on(Channel::One, 0x3C, 0x40).unwrap();
        let mut out = Vec::new();
        event.write_to(&mut out, None);
        event.write_to(&mut out, Some(0x90));
        event.write_to(&mut out, Some(0x80));
        assert_eq!(out, [0x90, 0x3C, 0x40, 0x3C, 0x40, 0x90, 0x3C, 0x40]);
    }
}
