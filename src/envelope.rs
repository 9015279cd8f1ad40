//! Per-message push envelope and its header-field wire form

use crate::codec::{decode_header_field, encode_header_field, EncodingError};
use crate::types::{PUBLIC_KEY_LEN, SALT_LEN};
use serde::{Deserialize, Serialize};

/// Encoded envelope as delivered in notification metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFields {
    /// Ciphertext with trailing GCM tag
    pub p: String,
    /// Sender's ephemeral public key
    pub k: String,
    /// Message salt
    pub s: String,
}

/// Decoded, length-checked envelope for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEnvelope {
    pub ciphertext: Vec<u8>,
    pub salt: [u8; SALT_LEN],
    pub sender_public_key: [u8; PUBLIC_KEY_LEN],
}

fn fixed<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N], EncodingError> {
    bytes.try_into().map_err(|_| EncodingError::InvalidLength {
        field,
        expected: N,
        got: bytes.len(),
    })
}

impl PushEnvelope {
    /// Build from raw byte fields, checking salt and key lengths
    pub fn new(
        ciphertext: Vec<u8>,
        salt: &[u8],
        sender_public_key: &[u8],
    ) -> Result<Self, EncodingError> {
        Ok(Self {
            ciphertext,
            salt: fixed("salt", salt)?,
            sender_public_key: fixed("sender public key", sender_public_key)?,
        })
    }

    /// Decode the `p`, `k` and `s` header fields
    pub fn from_header_fields(p: &str, k: &str, s: &str) -> Result<Self, EncodingError> {
        let ciphertext = decode_header_field(p)?;
        let sender_public_key = decode_header_field(k)?;
        let salt = decode_header_field(s)?;
        Self::new(ciphertext, &salt, &sender_public_key)
    }

    /// Encode back into header fields
    pub fn to_header_fields(&self) -> HeaderFields {
        HeaderFields {
            p: encode_header_field(&self.ciphertext),
            k: encode_header_field(&self.sender_public_key),
            s: encode_header_field(&self.salt),
        }
    }
}

impl TryFrom<&HeaderFields> for PushEnvelope {
    type Error = EncodingError;

    fn try_from(fields: &HeaderFields) -> Result<Self, Self::Error> {
        PushEnvelope::from_header_fields(&fields.p, &fields.k, &fields.s)
    }
}
