//! Zeroizing key material types
//!
//! Fixed-size wrappers for the secrets that flow through the aesgcm pipeline.
//! Every type clears its memory on drop so derived material never outlives a
//! single decryption.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the subscription auth secret
pub const AUTH_SECRET_LEN: usize = 16;

/// Length of the per-message salt
pub const SALT_LEN: usize = 16;

/// Length of an uncompressed SEC1 P-256 point
pub const PUBLIC_KEY_LEN: usize = 65;

/// Installation-wide auth secret (16 bytes), shared with the server at
/// subscription time
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AuthSecret(pub(crate) [u8; AUTH_SECRET_LEN]);

impl AuthSecret {
    /// Create an auth secret from a 16-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != AUTH_SECRET_LEN {
            return Err(KeyError::InvalidLength {
                expected: AUTH_SECRET_LEN,
                got: bytes.len(),
            });
        }
        let mut secret = [0u8; AUTH_SECRET_LEN];
        secret.copy_from_slice(bytes);
        Ok(AuthSecret(secret))
    }

    /// Get a reference to the secret bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for AuthSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthSecret([REDACTED])")
    }
}

impl From<[u8; AUTH_SECRET_LEN]> for AuthSecret {
    fn from(bytes: [u8; AUTH_SECRET_LEN]) -> Self {
        AuthSecret(bytes)
    }
}

/// Raw ECDH output: the X coordinate of the shared point
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(pub(crate) [u8; 32]);

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

impl SharedSecret {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// First-stage HKDF output keyed by the auth secret
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PseudoRandomKey(pub(crate) [u8; 32]);

impl PseudoRandomKey {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// AES-128 content-encryption key (16 bytes)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ContentKey(pub(crate) [u8; 16]);

impl ContentKey {
    /// Create a content key from a 16-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != 16 {
            return Err(KeyError::InvalidLength {
                expected: 16,
                got: bytes.len(),
            });
        }
        let mut key = [0u8; 16];
        key.copy_from_slice(bytes);
        Ok(ContentKey(key))
    }

    /// Get a reference to the key bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// 96-bit GCM nonce (12 bytes) that zeroizes on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Nonce96(pub(crate) [u8; 12]);

impl Nonce96 {
    /// Create a new nonce from a 12-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != 12 {
            return Err(KeyError::InvalidLength {
                expected: 12,
                got: bytes.len(),
            });
        }
        let mut nonce = [0u8; 12];
        nonce.copy_from_slice(bytes);
        Ok(Nonce96(nonce))
    }

    /// Get a reference to the nonce bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// Key-related errors
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}
