//! Unified error type for the decryption pipeline
//!
//! Component modules keep their own error types (`EncodingError`, `KeyError`,
//! `ConfigError`). `PushError` is what the pipeline hands back to callers: one
//! variant per failing stage, so a host can decide to fall back to the
//! undecrypted notification without inspecting details.
//!
//! # Example
//!
//! ```no_run
//! use webpush_aesgcm::{PushDecryptor, PushError, InstallationKeys};
//!
//! fn handle(keys: InstallationKeys, p: &str, k: &str, s: &str) {
//!     match PushDecryptor::new(keys).decrypt_fields(p, k, s) {
//!         Ok(record) => println!("{}", record.title),
//!         Err(PushError::AuthenticationFailed) => println!("show fallback"),
//!         Err(e) => println!("show fallback ({})", e.stage()),
//!     }
//! }
//! ```

use crate::codec::EncodingError;
use thiserror::Error;

/// Errors produced by the aesgcm decryption pipeline
///
/// # Error Categories
///
/// - **MalformedEncoding**: bad base-85 / base64 input or wrong decoded length
/// - **InvalidPeerKey**: sender public key is not a valid P-256 point
/// - **KeyDerivationFailed**: HKDF rejected the requested output length
/// - **AuthenticationFailed**: AEAD tag mismatch for any reason
/// - **MalformedPadding**: padding header inconsistent with plaintext length
/// - **InvalidRecord**: plaintext JSON missing required fields or mistyped
#[derive(Debug, Error)]
pub enum PushError {
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] EncodingError),

    #[error("invalid peer public key: {0}")]
    InvalidPeerKey(String),

    #[error("key derivation failed")]
    KeyDerivationFailed,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("malformed padding: {padding} padding bytes declared, plaintext is {len} bytes")]
    MalformedPadding { padding: usize, len: usize },

    #[error("invalid notification record: {0}")]
    InvalidRecord(String),
}

impl From<hkdf::InvalidLength> for PushError {
    fn from(_: hkdf::InvalidLength) -> Self {
        PushError::KeyDerivationFailed
    }
}

impl PushError {
    /// Name of the pipeline stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MalformedEncoding(_) => "decode",
            Self::InvalidPeerKey(_) => "key-agreement",
            Self::KeyDerivationFailed => "key-derivation",
            Self::AuthenticationFailed => "aead",
            Self::MalformedPadding { .. } => "padding",
            Self::InvalidRecord(_) => "record",
        }
    }

    /// Returns true if the failure came out of a cryptographic stage
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPeerKey(_) | Self::KeyDerivationFailed | Self::AuthenticationFailed
        )
    }

    /// Returns true if the push payload itself was structurally malformed
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedEncoding(_) | Self::MalformedPadding { .. } | Self::InvalidRecord(_)
        )
    }
}
