use core::fmt;

use crate::ParseError;

#[doc = r#"
A 7-bit value carried by a channel event.

Data bytes always have a leading 0 bit, which is what lets a decoder tell them
apart from status bytes. Construction checks the range.

# Example
```rust
# use smfkit::prelude::*;
let velocity = DataByte::new(100).unwrap();
assert_eq!(velocity.value(), 100);

assert_eq!(DataByte::new(128), Err(ParseError::ValueOutOfRange(128)));
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// The largest data byte.
    pub const MAX: Self = Self(0x7F);

    /// Checks for correctness (leading 0 bit).
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte > 0x7F {
            return Err(ParseError::ValueOutOfRange(byte));
        }
        Ok(Self(byte))
    }

    /// Creates a data byte without checking the leading bit.
    ///
    /// The value is masked to 7 bits.
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// Returns the inner byte
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DataByte> for u8 {
    fn from(value: DataByte) -> Self {
        value.0
    }
}

impl PartialEq<u8> for DataByte {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04X}", self.0)
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[test]
fn data_byte_range() {
    use pretty_assertions::assert_eq;

    assert_eq!(DataByte::new(0).unwrap().value(), 0);
    assert_eq!(DataByte::new(0x7F).unwrap(), DataByte::MAX);
    assert_eq!(DataByte::try_from(0x80), Err(ParseError::ValueOutOfRange(0x80)));
    assert_eq!(DataByte::new_unchecked(0xFF).value(), 0x7F);
}
