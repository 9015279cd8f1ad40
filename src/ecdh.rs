//! P-256 key agreement against the sender's ephemeral key

use crate::error::PushError;
use crate::types::{SharedSecret, PUBLIC_KEY_LEN};
use p256::elliptic_curve::point::AffineCoordinates;
use p256::{PublicKey, SecretKey};

/// Parse the sender's public key
///
/// Only the 65-byte uncompressed form is accepted. Off-curve points and the
/// identity are rejected by the SEC1 decoder.
pub fn parse_peer_key(bytes: &[u8]) -> Result<PublicKey, PushError> {
    if bytes.len() != PUBLIC_KEY_LEN {
        return Err(PushError::InvalidPeerKey(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_LEN,
            bytes.len()
        )));
    }
    if bytes[0] != 0x04 {
        return Err(PushError::InvalidPeerKey(format!(
            "expected uncompressed point tag 0x04, got 0x{:02x}",
            bytes[0]
        )));
    }
    PublicKey::from_sec1_bytes(bytes).map_err(|e| PushError::InvalidPeerKey(e.to_string()))
}

/// ECDH returning the raw X coordinate of the shared point
pub fn shared_x_coordinate(private_key: &SecretKey, public_key: &PublicKey) -> SharedSecret {
    let scalar = private_key.to_nonzero_scalar();
    let shared_point = (public_key.to_projective() * *scalar).to_affine();
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&shared_point.x());
    SharedSecret(secret)
}

/// Agree on a shared secret with an untrusted peer key
pub fn agree(private_key: &SecretKey, peer_public_key: &[u8]) -> Result<SharedSecret, PushError> {
    let peer = parse_peer_key(peer_public_key)?;
    Ok(shared_x_coordinate(private_key, &peer))
}
