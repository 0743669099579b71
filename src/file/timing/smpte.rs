#![doc = r#"
SMPTE frame rates in the header's time division

When the top bit of the division is set, the high byte holds one of four
frame rates stored as a negative two's complement number (-24, -25, -29 or
-30) and the low byte holds the number of ticks per frame.
"#]

use crate::HeaderError;

/// The possible FPS (Frames Per Second) for MIDI files
///
/// The MIDI specification defines only four possible frame types:
/// - 24 fps: Standard film rate
/// - 25 fps: PAL/SECAM television standard
/// - 29.97 fps: NTSC color television (drop-frame timecode)
/// - 30 fps: NTSC black & white, some digital video formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second, stored as -29
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// Reads the frame rate from the high byte of a time division.
    pub const fn from_division_byte(byte: u8) -> Result<Self, HeaderError> {
        match byte as i8 {
            -24 => Ok(Self::TwentyFour),
            -25 => Ok(Self::TwentyFive),
            -29 => Ok(Self::TwentyNine),
            -30 => Ok(Self::Thirty),
            v => Err(HeaderError::SmpteFps(v)),
        }
    }

    /// The high byte of a time division using this frame rate.
    pub const fn as_division_byte(&self) -> u8 {
        (-(self.as_division() as i8)) as u8
    }

    /// Get the nominal frame rate as it is written in the division.
    ///
    /// Drop-frame 29.97 fps returns 29 here.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 29,
            Self::Thirty => 30,
        }
    }
}

#[test]
fn division_bytes_round_trip() {
    use pretty_assertions::assert_eq;

    for fps in [
        SmpteFps::TwentyFour,
        SmpteFps::TwentyFive,
        SmpteFps::TwentyNine,
        SmpteFps::Thirty,
    ] {
        assert_eq!(SmpteFps::from_division_byte(fps.as_division_byte()), Ok(fps));
    }
    assert_eq!(SmpteFps::from_division_byte(0xE7), Ok(SmpteFps::TwentyFive));
    assert_eq!(
        SmpteFps::from_division_byte(0xE6),
        Err(HeaderError::SmpteFps(-26))
    );
}
