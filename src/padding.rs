//! aesgcm record padding
//!
//! Plaintext starts with a big-endian u16 padding length, followed by that
//! many filler bytes, followed by the message.

use crate::error::PushError;

/// Size of the padding length header
pub const PADDING_HEADER_LEN: usize = 2;

/// Remove the padding block, returning the message bytes
pub fn strip_padding(plaintext: &[u8]) -> Result<&[u8], PushError> {
    let Some(header) = plaintext.get(..PADDING_HEADER_LEN) else {
        return Err(PushError::MalformedPadding {
            padding: 0,
            len: plaintext.len(),
        });
    };
    let padding = usize::from(u16::from_be_bytes([header[0], header[1]]));

    plaintext
        .get(PADDING_HEADER_LEN + padding..)
        .ok_or(PushError::MalformedPadding {
            padding,
            len: plaintext.len(),
        })
}

/// Prepend a zero-filled padding block of `padding` bytes
pub fn pad(payload: &[u8], padding: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(PADDING_HEADER_LEN + usize::from(padding) + payload.len());
    out.extend_from_slice(&padding.to_be_bytes());
    out.resize(PADDING_HEADER_LEN + usize::from(padding), 0);
    out.extend_from_slice(payload);
    out
}
