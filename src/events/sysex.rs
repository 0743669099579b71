use crate::{
    EncodeError, EventError, ParseError,
    reader::{MidiSource, ReadResult, Reader},
    varlen,
};
use alloc::{borrow::Cow, vec::Vec};

#[doc = r#"
A system exclusive event.

The status is either `0xF0` (a sysex message, or its first packet) or `0xF7`
(a continuation packet, or an escape carrying arbitrary bytes). The data is
stored as it appears in the file, after the length.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SysExEvent<'a> {
    status: u8,
    data: Cow<'a, [u8]>,
}

impl<'a> SysExEvent<'a> {
    /// `0xF0`
    pub const START: u8 = 0xF0;
    /// `0xF7`
    pub const ESCAPE: u8 = 0xF7;

    /// Create an `0xF0` event
    pub fn new(data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            status: Self::START,
            data: data.into(),
        }
    }

    /// Create an event with an explicit status.
    ///
    /// # Errors
    /// [`EventError::InvalidSysExStatus`] unless `status` is `0xF0` or `0xF7`.
    pub fn with_status(status: u8, data: impl Into<Cow<'a, [u8]>>) -> Result<Self, ParseError> {
        if status != Self::START && status != Self::ESCAPE {
            return Err(EventError::InvalidSysExStatus(status).into());
        }
        Ok(Self {
            status,
            data: data.into(),
        })
    }

    /// `0xF0` or `0xF7`
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// The payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Detach from the input buffer
    pub fn into_owned(self) -> SysExEvent<'static> {
        SysExEvent {
            status: self.status,
            data: Cow::Owned(self.data.into_owned()),
        }
    }

    pub(crate) fn read<R: MidiSource<'a>>(reader: &mut Reader<R>, status: u8) -> ReadResult<Self> {
        let data = reader.read_length_prefixed()?;
        Ok(Self { status, data })
    }

    /// Writes the event, status byte included.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.push(self.status);
        varlen::write_length_prefixed(out, &self.data)
    }
}

#[test]
fn sysex_status_is_checked() {
    use pretty_assertions::assert_eq;

    assert_eq!(SysExEvent::new(&[1u8][..]).status(), 0xF0);
    assert_eq!(SysExEvent::with_status(0xF7, &[1u8][..]).unwrap().status(), 0xF7);
    assert_eq!(
        SysExEvent::with_status(0xF1, &[1u8][..]),
        Err(ParseError::Event(EventError::InvalidSysExStatus(0xF1)))
    );
}

#[test]
fn read_sysex_after_status() {
    use pretty_assertions::assert_eq;

    let bytes = [0x02, 0x66, 0x66, 0x10];
    let mut reader = Reader::from_byte_slice(&bytes);
    let event = SysExEvent::read(&mut reader, 0xF0).unwrap();
    assert_eq!(reader.buffer_position(), 3);
    assert_eq!(event, SysExEvent::new(&[0x66u8, 0x66][..]));
    assert_ne!(event, SysExEvent::new(&[0x66u8, 0x67][..]));
}
