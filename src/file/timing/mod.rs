mod smpte;
pub use smpte::*;

use crate::HeaderError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format. It is a structural view of the
/// header's time division; no tick-to-time conversion is done here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(u16),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte {
        /// Frames per second
        fps: SmpteFps,
        /// Ticks per frame
        ticks_per_frame: u8,
    },
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(tpqn & 0x7FFF)
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte {
            fps,
            ticks_per_frame,
        }
    }

    /// Splits a raw time division.
    ///
    /// # Errors
    /// [`HeaderError::SmpteFps`] if the SMPTE bit is set and the frame rate is not one of the four
    /// allowed.
    pub const fn from_division(division: u16) -> Result<Self, HeaderError> {
        let [hi, lo] = division.to_be_bytes();
        if hi >> 7 == 0 {
            //this is ticks per quarter_note
            return Ok(Self::TicksPerQuarterNote(division));
        }
        match SmpteFps::from_division_byte(hi) {
            Ok(fps) => Ok(Self::new_smpte(fps, lo)),
            Err(e) => Err(e),
        }
    }

    /// The raw time division as written in the header
    pub const fn division(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => *t & 0x7FFF,
            Self::Smpte {
                fps,
                ticks_per_frame,
            } => u16::from_be_bytes([fps.as_division_byte(), *ticks_per_frame]),
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            _ => None,
        }
    }
}
