#![warn(missing_docs)]
#![warn(clippy::print_stdout)]
#![doc = r#"
A decoder and encoder for Standard MIDI Files (SMF).

# Overview

A Standard MIDI File is a sequence of chunks. The first chunk (`MThd`) is the
header, which declares the file's format, how many tracks follow and how delta
times are divided. Every following chunk (`MTrk`) is a track: a byte-bounded
stream of events, each prefixed with a variable-length delta time.

Events come in three families:
- [`ChannelEvent`](crate::events::ChannelEvent)s, which carry musical data for one of sixteen channels
- [`MetaEvent`](crate::events::MetaEvent)s (`0xFF`), which carry information about the sequence
- [`SysExEvent`](crate::events::SysExEvent)s (`0xF0`/`0xF7`), which carry arbitrary device data

Channel events may omit their status byte when it matches the previous
event's status ("running status"). This crate accepts both forms when reading,
and elides repeated status bytes when writing unless told otherwise.

# Example
```rust
use smfkit::prelude::*;

let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x00, 0x00, 0x01, 0x00, 0x60, // format 0, one track, 96 tpqn
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0B, // MTrk, length 11
    0x00, 0x90, 0x3C, 0x40, // note on
    0x60, 0x3C, 0x00, // running status note on, velocity 0
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

let file = MidiFile::parse(&bytes[..]).unwrap();
assert_eq!(file.format_type(), FormatType::SingleMultiChannel);
assert_eq!(file.tracks()[0].len(), 3);

assert_eq!(file.serialize().unwrap(), bytes);
```
"#]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod byte;
pub use byte::*;

mod error;
pub use error::*;

pub mod events;

pub mod file;

pub mod reader;

pub mod varlen;

#[doc = r#"
Common re-exports for working with MIDI files
"#]
pub mod prelude {
    pub use crate::{
        byte::*,
        error::*,
        events::*,
        file::*,
        reader::{MidiSource, ReadResult, Reader, ReaderError, ReaderErrorKind},
        varlen::{VarLen, encode_varlen},
    };

    #[cfg(feature = "std")]
    pub use crate::reader::IoSource;
}
