#![doc = r#"
Rusty representation of a [`MidiFile`]

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Track Chunk 2: "MTrk"]
...
[Track Chunk N: "MTrk"]
```

The header declares how many track chunks follow; exactly that many are
read, back to back. Any error aborts the whole parse: once a track's
framing is lost there is no reliable way to find the next event.
"#]

mod format;
pub use format::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

use crate::{
    EncodeError, HeaderError,
    events::StatusMode,
    reader::{MidiSource, ReadResult, Reader},
};
use alloc::{borrow::Cow, vec::Vec};

#[doc = r#"
A parsed Standard MIDI File: format, time division and tracks.

```rust
# use smfkit::prelude::*;
let mut track = Track::default();
track.push(DeltaEvent::new(0, ChannelEvent::note_on(Channel::One, 60, 100).unwrap()));
track.push(DeltaEvent::new(96, ChannelEvent::note_off(Channel::One, 60, 0).unwrap()));
track.push(DeltaEvent::new(0, MetaEvent::end_of_track()));

let file = MidiFile::new(FormatType::SingleMultiChannel, 96, vec![track]);
let bytes = file.serialize().unwrap();

assert_eq!(MidiFile::parse(&bytes).unwrap(), file);
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MidiFile<'a> {
    format: FormatType,
    time_division: u16,
    tracks: Vec<Track<'a>>,
}

impl<'a> MidiFile<'a> {
    /// Create a file from its parts
    pub fn new(format: FormatType, time_division: u16, tracks: Vec<Track<'a>>) -> Self {
        Self {
            format,
            time_division,
            tracks,
        }
    }

    /// Parse a set of bytes into a file struct
    ///
    /// Borrowed input is parsed without copying event payloads.
    pub fn parse<B>(bytes: B) -> ReadResult<Self>
    where
        B: Into<Cow<'a, [u8]>>,
    {
        match bytes.into() {
            Cow::Borrowed(slice) => Self::read(&mut Reader::from_byte_slice(slice)),
            Cow::Owned(vec) => {
                MidiFile::read(&mut Reader::from_byte_slice(&vec)).map(MidiFile::into_owned)
            }
        }
    }

    /// Read a header chunk and the tracks it declares.
    pub fn read<R: MidiSource<'a>>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let header = Header::read(reader)?;

        let mut tracks = Vec::with_capacity(header.track_count() as usize);
        for _ in 0..header.track_count() {
            tracks.push(Track::read(reader)?);
        }

        Ok(Self {
            format: header.format_type(),
            time_division: header.time_division(),
            tracks,
        })
    }

    /// Parse from any [`std::io::Read`]. Every payload is copied.
    #[cfg(feature = "std")]
    pub fn from_io<R: std::io::Read>(read: R) -> ReadResult<MidiFile<'static>> {
        MidiFile::read(&mut Reader::from_io(read))
    }

    /// Returns the format type for the file.
    pub const fn format_type(&self) -> FormatType {
        self.format
    }

    /// The raw time division from the header
    pub const fn time_division(&self) -> u16 {
        self.time_division
    }

    /// Returns header timing info
    pub const fn timing(&self) -> Result<Timing, HeaderError> {
        Timing::from_division(self.time_division)
    }

    /// The header this file would be written with.
    ///
    /// # Errors
    /// [`EncodeError::TooManyTracks`] if the track count does not fit in a u16.
    pub fn header(&self) -> Result<Header, EncodeError> {
        let track_count = u16::try_from(self.tracks.len())
            .map_err(|_| EncodeError::TooManyTracks(self.tracks.len()))?;
        Ok(Header::new(self.format, track_count, self.time_division))
    }

    /// Returns a track list
    pub fn tracks(&self) -> &[Track<'a>] {
        &self.tracks
    }

    /// Executes the provided function for all the tracks in the file.
    pub fn for_each_track<F>(&self, func: F)
    where
        F: FnMut(&Track<'a>),
    {
        self.tracks.iter().for_each(func)
    }

    /// Returns the tracks
    pub fn into_tracks(self) -> Vec<Track<'a>> {
        self.tracks
    }

    /// Detach from the input buffer
    pub fn into_owned(self) -> MidiFile<'static> {
        MidiFile {
            format: self.format,
            time_division: self.time_division,
            tracks: self.tracks.into_iter().map(Track::into_owned).collect(),
        }
    }

    /// Serializes the file, using running status inside tracks.
    pub fn serialize(&self) -> Result<Vec<u8>, EncodeError> {
        self.serialize_with(StatusMode::Running)
    }

    /// Serializes the file with the given status byte policy.
    pub fn serialize_with(&self, mode: StatusMode) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.write_to(&mut out, mode)?;
        Ok(out)
    }

    /// Appends the serialized file to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>, mode: StatusMode) -> Result<(), EncodeError> {
        self.header()?.write_to(out);
        for track in &self.tracks {
            track.write_to(out, mode)?;
        }
        Ok(())
    }

    /// Serializes the file into any [`std::io::Write`].
    #[cfg(feature = "std")]
    pub fn write_std<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        let bytes = self
            .serialize()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        out.write_all(&bytes)
    }
}
