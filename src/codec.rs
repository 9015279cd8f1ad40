//! Header field and access token codecs
//!
//! The `p`, `k` and `s` header fields travel in the Z85 (ZeroMQ) base-85
//! alphabet. Every 4 input bytes become 5 characters, most significant digit
//! first. A trailing group of `n` bytes (1..=3) is zero-padded to 4 bytes,
//! encoded, and truncated to `n + 1` characters. Decoding a short group pads it
//! back with the highest digit (`#`), which restores the original bytes exactly.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

const ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

const GROUP_CHARS: usize = 5;
const GROUP_BYTES: usize = 4;
const HIGHEST_DIGIT: u64 = 84;
const INVALID: u8 = 0xFF;

const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Errors raised while decoding header fields or access tokens
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid base-85 character 0x{byte:02x} at offset {offset}")]
    InvalidCharacter { byte: u8, offset: usize },

    #[error("truncated base-85 group at offset {offset}")]
    TruncatedGroup { offset: usize },

    #[error("base-85 group at offset {offset} exceeds 32 bits")]
    GroupOverflow { offset: usize },

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("{field} must be {expected} bytes, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },
}

fn digit_value(byte: u8) -> Option<u64> {
    match DECODE_TABLE.get(byte as usize) {
        Some(&INVALID) | None => None,
        Some(&digit) => Some(u64::from(digit)),
    }
}

/// Decode a base-85 header field (`p`, `k` or `s`) into raw bytes
pub fn decode_header_field(input: &str) -> Result<Vec<u8>, EncodingError> {
    let chars = input.as_bytes();
    let mut out = Vec::with_capacity(chars.len() / GROUP_CHARS * GROUP_BYTES + GROUP_BYTES);

    for (index, group) in chars.chunks(GROUP_CHARS).enumerate() {
        let offset = index * GROUP_CHARS;
        // A lone character cannot carry a single byte
        if group.len() == 1 {
            return Err(EncodingError::TruncatedGroup { offset });
        }

        let mut value: u64 = 0;
        for position in 0..GROUP_CHARS {
            let digit = match group.get(position) {
                Some(&byte) => digit_value(byte).ok_or(EncodingError::InvalidCharacter {
                    byte,
                    offset: offset + position,
                })?,
                None => HIGHEST_DIGIT,
            };
            value = value * 85 + digit;
        }

        let value = u32::try_from(value).map_err(|_| EncodingError::GroupOverflow { offset })?;
        out.extend_from_slice(&value.to_be_bytes()[..group.len() - 1]);
    }

    Ok(out)
}

/// Encode raw bytes as a base-85 header field
///
/// Inverse of [`decode_header_field`]; used by senders and test fixtures.
pub fn encode_header_field(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(GROUP_BYTES) * GROUP_CHARS);

    for chunk in data.chunks(GROUP_BYTES) {
        let mut block = [0u8; GROUP_BYTES];
        block[..chunk.len()].copy_from_slice(chunk);
        let mut value = u32::from_be_bytes(block);

        let mut digits = [0u8; GROUP_CHARS];
        for slot in digits.iter_mut().rev() {
            *slot = ALPHABET[(value % 85) as usize];
            value /= 85;
        }
        out.extend(digits[..chunk.len() + 1].iter().map(|&d| d as char));
    }

    out
}

/// Rewrite URL-safe unpadded base64 into standard, padded base64
pub fn to_standard_base64(token: &str) -> String {
    let mut normalized: String = token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let padding = (4 - normalized.len() % 4) % 4;
    normalized.extend(std::iter::repeat('=').take(padding));
    normalized
}

/// Decode a URL-safe, unpadded base64 access token
pub fn normalize_access_token(token: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(STANDARD.decode(to_standard_base64(token))?)
}
