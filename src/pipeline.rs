//! The aesgcm decryption pipeline
//!
//! decode → ECDH → HKDF → AES-128-GCM → unpad → JSON. Each stage either hands
//! its output to the next or returns a typed [`PushError`]; nothing here
//! performs I/O or touches shared state.

use crate::aead;
use crate::ecdh;
use crate::envelope::{HeaderFields, PushEnvelope};
use crate::error::PushError;
use crate::kdf;
use crate::keys::KeyProvider;
use crate::padding::strip_padding;
use crate::record::NotificationRecord;
use tracing::{debug, warn};

/// Decrypts push envelopes with the key material of one installation
#[derive(Debug, Clone)]
pub struct PushDecryptor<K> {
    keys: K,
}

impl<K: KeyProvider> PushDecryptor<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    /// Decrypt and unpad, returning the raw message bytes
    pub fn decrypt_payload(&self, envelope: &PushEnvelope) -> Result<Vec<u8>, PushError> {
        let key_pair = self.keys.key_pair();

        let shared_secret = ecdh::agree(key_pair.private_key(), &envelope.sender_public_key)?;
        let material = kdf::derive(
            &shared_secret,
            self.keys.auth_secret(),
            &envelope.salt,
            key_pair.public_key_bytes(),
            &envelope.sender_public_key,
        )?;
        debug!(ciphertext_len = envelope.ciphertext.len(), "derived content key");

        let plaintext = aead::open(&material.nonce, &material.content_key, &envelope.ciphertext)?;
        let payload = strip_padding(&plaintext)?;
        debug!(
            plaintext_len = plaintext.len(),
            payload_len = payload.len(),
            "decrypted push payload"
        );
        Ok(payload.to_vec())
    }

    /// Full pipeline: envelope to notification record
    pub fn decrypt(&self, envelope: &PushEnvelope) -> Result<NotificationRecord, PushError> {
        let result = self
            .decrypt_payload(envelope)
            .and_then(|payload| NotificationRecord::parse(&payload));
        if let Err(e) = &result {
            warn!(stage = e.stage(), error = %e, "push decryption failed");
        }
        result
    }

    /// Full pipeline starting from the encoded `p`, `k` and `s` fields
    pub fn decrypt_fields(
        &self,
        p: &str,
        k: &str,
        s: &str,
    ) -> Result<NotificationRecord, PushError> {
        let envelope = PushEnvelope::from_header_fields(p, k, s).map_err(|e| {
            warn!(stage = "decode", error = %e, "push header fields rejected");
            PushError::from(e)
        })?;
        self.decrypt(&envelope)
    }

    pub fn decrypt_header_fields(
        &self,
        fields: &HeaderFields,
    ) -> Result<NotificationRecord, PushError> {
        self.decrypt_fields(&fields.p, &fields.k, &fields.s)
    }
}

/// One-shot decryption with borrowed key material
pub fn decrypt<K: KeyProvider + ?Sized>(
    keys: &K,
    envelope: &PushEnvelope,
) -> Result<NotificationRecord, PushError> {
    PushDecryptor::new(keys).decrypt(envelope)
}
