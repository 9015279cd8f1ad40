//! Sender side of the aesgcm scheme
//!
//! Produces envelopes the way a push server does. Used to build fixtures and
//! to exercise the decryption pipeline end to end.

use crate::aead;
use crate::ecdh;
use crate::envelope::PushEnvelope;
use crate::error::PushError;
use crate::kdf;
use crate::padding::pad;
use crate::types::{AuthSecret, PUBLIC_KEY_LEN, SALT_LEN};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::SecretKey;
use rand::{rngs::OsRng, RngCore};

/// Encrypt `plaintext` for a subscriber with a fresh ephemeral key and salt
pub fn seal(
    receiver_public_key: &[u8; PUBLIC_KEY_LEN],
    auth_secret: &AuthSecret,
    plaintext: &[u8],
    padding: u16,
) -> Result<PushEnvelope, PushError> {
    let ephemeral = SecretKey::random(&mut OsRng);
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    seal_with(&ephemeral, salt, receiver_public_key, auth_secret, plaintext, padding)
}

/// Encrypt with caller-chosen ephemeral key and salt
///
/// Deterministic; intended for reproducible vectors. Never reuse an
/// ephemeral key and salt pair for two messages.
pub fn seal_with(
    ephemeral: &SecretKey,
    salt: [u8; SALT_LEN],
    receiver_public_key: &[u8; PUBLIC_KEY_LEN],
    auth_secret: &AuthSecret,
    plaintext: &[u8],
    padding: u16,
) -> Result<PushEnvelope, PushError> {
    let receiver = ecdh::parse_peer_key(receiver_public_key)?;
    let shared_secret = ecdh::shared_x_coordinate(ephemeral, &receiver);

    let mut sender_public_key = [0u8; PUBLIC_KEY_LEN];
    sender_public_key.copy_from_slice(ephemeral.public_key().to_encoded_point(false).as_bytes());

    // client = receiver, server = sender, same as on the decrypting side
    let material = kdf::derive(
        &shared_secret,
        auth_secret,
        &salt,
        receiver_public_key,
        &sender_public_key,
    )?;
    let ciphertext = aead::seal(&material.nonce, &material.content_key, &pad(plaintext, padding))?;

    Ok(PushEnvelope {
        ciphertext,
        salt,
        sender_public_key,
    })
}
