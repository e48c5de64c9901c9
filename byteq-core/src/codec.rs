//! Length-prefix codec.
//!
//! Every record is framed by the unsigned varint encoding of its payload
//! length: 7 bits per byte, least significant group first, high bit set on
//! every byte but the last.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────┐
//! │ uvarint(len) 1..=5 B │ payload (len bytes)  │
//! └──────────────────────┴──────────────────────┘
//! ```

use bytes::{Buf, BufMut};
use thiserror::Error;

/// Maximum encoded width of a length header (a full `u32`).
pub const MAX_HEADER_SIZE: usize = 5;

/// Failure to decode a length header.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended while the continuation bit was still set.
    #[error("truncated length header")]
    Truncated,
    /// Header longer than five bytes or a value above `u32::MAX`.
    #[error("length header overflows 32 bits")]
    Overflow,
}

/// Number of bytes needed to encode `value`.
#[must_use]
pub const fn encoded_len(value: u32) -> usize {
    if value < 1 << 7 {
        1
    } else if value < 1 << 14 {
        2
    } else if value < 1 << 21 {
        3
    } else if value < 1 << 28 {
        4
    } else {
        5
    }
}

/// Framed size of a record carrying `payload_len` bytes.
#[must_use]
pub const fn framed_len(payload_len: u32) -> usize {
    encoded_len(payload_len) + payload_len as usize
}

/// Write `value` as a uvarint and return the number of bytes written.
///
/// # Panics
///
/// Panics if `buf` has fewer than [`encoded_len`] bytes of room.
pub fn put_uvarint<B: BufMut>(buf: &mut B, value: u32) -> usize {
    let mut rest = value;
    let mut written = 1;
    while rest >= 0x80 {
        buf.put_u8(rest as u8 | 0x80);
        rest >>= 7;
        written += 1;
    }
    buf.put_u8(rest as u8);
    written
}

/// Read a uvarint from the front of `buf`.
///
/// Returns the decoded value and the number of bytes consumed. Non-minimal
/// encodings are accepted as long as they fit in [`MAX_HEADER_SIZE`] bytes.
pub fn get_uvarint<B: Buf>(buf: &mut B) -> Result<(u32, usize), DecodeError> {
    let mut value: u64 = 0;
    for consumed in 0..MAX_HEADER_SIZE {
        if !buf.has_remaining() {
            return Err(DecodeError::Truncated);
        }
        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7f) << (7 * consumed);
        if byte < 0x80 {
            let value = u32::try_from(value).map_err(|_| DecodeError::Overflow)?;
            return Ok((value, consumed + 1));
        }
    }
    Err(DecodeError::Overflow)
}
