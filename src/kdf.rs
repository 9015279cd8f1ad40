//! Two-stage HKDF derivation of the aesgcm content key and nonce
//!
//! Stage 1 mixes the ECDH secret with the subscription auth secret:
//!
//! ```text
//! PRK   = HKDF-SHA256(salt = auth_secret, ikm = ecdh_x, info = "Content-Encoding: auth\0", L = 32)
//! ```
//!
//! Stage 2 keys off the per-message salt with a context binding both public
//! keys:
//!
//! ```text
//! CEK   = HKDF-SHA256(salt = salt, ikm = PRK, info = build_info("aesgcm", ...), L = 16)
//! NONCE = HKDF-SHA256(salt = salt, ikm = PRK, info = build_info("nonce", ...),  L = 12)
//! ```
//!
//! A byte-level mistake here does not fail loudly; it yields a key that fails
//! GCM authentication.

use crate::error::PushError;
use crate::types::{
    AuthSecret, ContentKey, Nonce96, PseudoRandomKey, SharedSecret, PUBLIC_KEY_LEN, SALT_LEN,
};
use hkdf::Hkdf;
use sha2::Sha256;

/// Info string of the first (auth) stage, NUL terminated
pub const AUTH_INFO: &[u8] = b"Content-Encoding: auth\0";

/// Content type used when deriving the content-encryption key
pub const CONTENT_ENCODING_AESGCM: &str = "aesgcm";

/// Content type used when deriving the nonce
pub const CONTENT_ENCODING_NONCE: &str = "nonce";

const CONTENT_ENCODING_PREFIX: &[u8] = b"Content-Encoding: ";
const CURVE_LABEL: &[u8] = b"P-256";

/// Key and nonce for a single message
pub struct DerivedMaterial {
    pub content_key: ContentKey,
    pub nonce: Nonce96,
}

fn hkdf_sha256<const N: usize>(salt: &[u8], ikm: &[u8], info: &[u8]) -> Result<[u8; N], PushError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = [0u8; N];
    hk.expand(info, &mut okm)?;
    Ok(okm)
}

/// Build the stage-2 info block
///
/// `"Content-Encoding: " || type || 0x00 || "P-256" || 0x00 ||
/// 0x0041 || client_public || 0x0041 || server_public`
pub fn build_info(
    content_type: &str,
    client_public_key: &[u8; PUBLIC_KEY_LEN],
    server_public_key: &[u8; PUBLIC_KEY_LEN],
) -> Vec<u8> {
    let key_len = (PUBLIC_KEY_LEN as u16).to_be_bytes();
    let mut info = Vec::with_capacity(
        CONTENT_ENCODING_PREFIX.len()
            + content_type.len()
            + CURVE_LABEL.len()
            + 2 * (2 + PUBLIC_KEY_LEN)
            + 2,
    );
    info.extend_from_slice(CONTENT_ENCODING_PREFIX);
    info.extend_from_slice(content_type.as_bytes());
    info.push(0x00);
    info.extend_from_slice(CURVE_LABEL);
    info.push(0x00);
    info.extend_from_slice(&key_len);
    info.extend_from_slice(client_public_key);
    info.extend_from_slice(&key_len);
    info.extend_from_slice(server_public_key);
    info
}

/// Stage 1: combine the ECDH secret with the auth secret
pub fn derive_prk(
    shared_secret: &SharedSecret,
    auth_secret: &AuthSecret,
) -> Result<PseudoRandomKey, PushError> {
    let prk = hkdf_sha256::<32>(auth_secret.as_slice(), shared_secret.as_slice(), AUTH_INFO)?;
    Ok(PseudoRandomKey(prk))
}

/// Stage 2: the 16-byte AES-128-GCM content key
pub fn derive_content_key(
    prk: &PseudoRandomKey,
    salt: &[u8; SALT_LEN],
    client_public_key: &[u8; PUBLIC_KEY_LEN],
    server_public_key: &[u8; PUBLIC_KEY_LEN],
) -> Result<ContentKey, PushError> {
    let info = build_info(CONTENT_ENCODING_AESGCM, client_public_key, server_public_key);
    Ok(ContentKey(hkdf_sha256::<16>(salt, prk.as_slice(), &info)?))
}

/// Stage 2b: the 12-byte GCM nonce
pub fn derive_nonce(
    prk: &PseudoRandomKey,
    salt: &[u8; SALT_LEN],
    client_public_key: &[u8; PUBLIC_KEY_LEN],
    server_public_key: &[u8; PUBLIC_KEY_LEN],
) -> Result<Nonce96, PushError> {
    let info = build_info(CONTENT_ENCODING_NONCE, client_public_key, server_public_key);
    Ok(Nonce96(hkdf_sha256::<12>(salt, prk.as_slice(), &info)?))
}

/// Run both stages for one message
///
/// `client_public_key` is always the receiver's static key and
/// `server_public_key` the sender's ephemeral key, on both sides of the
/// exchange.
pub fn derive(
    shared_secret: &SharedSecret,
    auth_secret: &AuthSecret,
    salt: &[u8; SALT_LEN],
    client_public_key: &[u8; PUBLIC_KEY_LEN],
    server_public_key: &[u8; PUBLIC_KEY_LEN],
) -> Result<DerivedMaterial, PushError> {
    let prk = derive_prk(shared_secret, auth_secret)?;
    Ok(DerivedMaterial {
        content_key: derive_content_key(&prk, salt, client_public_key, server_public_key)?,
        nonce: derive_nonce(&prk, salt, client_public_key, server_public_key)?,
    })
}
