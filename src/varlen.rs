#![doc = r#"
Variable-length quantities

MIDI files store delta times and payload lengths as big-endian base-128
integers. Each byte holds seven bits of the value; every byte except the last
has its top bit set.

```text
0x00000000  ->  00
0x0000007F  ->  7F
0x00000080  ->  81 00
0x00100000  ->  C0 80 00
0x0FFFFFFF  ->  FF FF FF 7F
```

Four bytes is the most the format allows, so the largest value is
[`MAX_VARLEN`] (`0x0FFFFFFF`). Anything larger is an overflow in both
directions.
"#]

use core::{fmt, ops::Deref};

use crate::{
    EncodeError, ParseError,
    reader::{MidiSource, ReadResult, Reader, inv_data},
};
use alloc::{borrow::Cow, vec::Vec};

/// The largest value a variable-length quantity can hold (28 bits).
pub const MAX_VARLEN: u32 = 0x0FFF_FFFF;

const MAX_VARLEN_BYTES: usize = 4;

/// The encoded form of a variable-length quantity.
///
/// Derefs to the encoded bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VarLen {
    buf: [u8; MAX_VARLEN_BYTES],
    len: u8,
}

impl VarLen {
    /// The encoded bytes, most significant group first
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for VarLen {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for VarLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VarLen").field(&self.as_bytes()).finish()
    }
}

/// Encodes `value` in the fewest bytes possible.
///
/// # Errors
/// [`EncodeError::IntegerOverflow`] if `value` is above [`MAX_VARLEN`].
pub const fn encode_varlen(value: u32) -> Result<VarLen, EncodeError> {
    if value > MAX_VARLEN {
        return Err(EncodeError::IntegerOverflow(value as u64));
    }
    let mut groups = 1;
    while groups < MAX_VARLEN_BYTES && value >> (7 * groups) != 0 {
        groups += 1;
    }

    let mut buf = [0; MAX_VARLEN_BYTES];
    let mut i = 0;
    while i < groups {
        let shift = 7 * (groups - 1 - i);
        let group = ((value >> shift) & 0x7F) as u8;
        buf[i] = if i + 1 == groups { group } else { group | 0x80 };
        i += 1;
    }
    Ok(VarLen {
        buf,
        len: groups as u8,
    })
}

/// Appends the encoding of `value` to `out`.
pub fn write_varlen(out: &mut Vec<u8>, value: u32) -> Result<(), EncodeError> {
    out.extend_from_slice(&encode_varlen(value)?);
    Ok(())
}

/// Appends the length of `data` as a variable-length quantity, then `data` itself.
pub fn write_length_prefixed(out: &mut Vec<u8>, data: &[u8]) -> Result<(), EncodeError> {
    let len = u32::try_from(data.len())
        .map_err(|_| EncodeError::IntegerOverflow(data.len() as u64))?;
    write_varlen(out, len)?;
    out.extend_from_slice(data);
    Ok(())
}

/// Reads a variable-length quantity.
///
/// Non-minimal encodings (such as `80 00`) are accepted.
///
/// # Errors
/// - [`OutOfBounds`](crate::reader::ReaderErrorKind::OutOfBounds) if the source ends
///   before a byte with a clear top bit
/// - [`ParseError::IntegerOverflow`] if the first four bytes all have their top bit set
pub fn read_varlen<'slc, R: MidiSource<'slc>>(reader: &mut Reader<R>) -> ReadResult<u32> {
    let mut value: u32 = 0;
    for _ in 0..MAX_VARLEN_BYTES {
        let byte = reader.read_next()?;
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(inv_data(reader, ParseError::IntegerOverflow))
}

/// Reads a variable-length size, then exactly that many bytes.
pub fn read_length_prefixed<'slc, R: MidiSource<'slc>>(
    reader: &mut Reader<R>,
) -> ReadResult<Cow<'slc, [u8]>> {
    let len = read_varlen(reader)?;
    reader.read_exact(len as usize)
}
