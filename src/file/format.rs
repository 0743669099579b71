use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::HeaderError;

#[doc = r#"
How the tracks of a file relate to each other.

The header stores this as a 16-bit number, 0 to 2.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: a single track holding every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks played together
    Simultaneous = 1,
    /// Format 2: independent single-track patterns
    SequentiallyIndependent = 2,
}

impl FormatType {
    /// Reads the header's format field.
    pub fn from_u16(value: u16) -> Result<Self, HeaderError> {
        Self::try_from(value).map_err(|e| HeaderError::InvalidFormat(e.number))
    }

    /// The header field value
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

#[test]
fn format_field() {
    use pretty_assertions::assert_eq;

    assert_eq!(FormatType::from_u16(0), Ok(FormatType::SingleMultiChannel));
    assert_eq!(FormatType::from_u16(2).map(FormatType::as_u16), Ok(2));
    assert_eq!(FormatType::from_u16(3), Err(HeaderError::InvalidFormat(3)));
}
