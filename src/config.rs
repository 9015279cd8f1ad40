//! Loading installation key material
//!
//! Keys are stored the way Web Push subscriptions exchange them: URL-safe
//! base64 without padding. The public key is optional and, when present, is
//! checked against the one derived from the private key.

use crate::keys::{InstallationKeys, KeyProvider};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the private key scalar
pub const ENV_PRIVATE_KEY: &str = "WEBPUSH_PRIVATE_KEY";
/// Environment variable holding the auth secret
pub const ENV_AUTH_SECRET: &str = "WEBPUSH_AUTH_SECRET";
/// Environment variable holding the (optional) public key
pub const ENV_PUBLIC_KEY: &str = "WEBPUSH_PUBLIC_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} is not valid base64url: {source}")]
    Base64 {
        field: &'static str,
        source: base64::DecodeError,
    },

    #[error("invalid key material: {0}")]
    Key(#[from] crate::types::KeyError),

    #[error("public key does not match private key")]
    PublicKeyMismatch,
}

/// Serialized key material of one installation
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyMaterialConfig {
    pub private_key: String,
    pub auth_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl std::fmt::Debug for KeyMaterialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterialConfig")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>, ConfigError> {
    URL_SAFE_NO_PAD
        .decode(value.trim().trim_end_matches('='))
        .map_err(|source| ConfigError::Base64 { field, source })
}

impl KeyMaterialConfig {
    /// Read `WEBPUSH_PRIVATE_KEY`, `WEBPUSH_AUTH_SECRET` and optionally
    /// `WEBPUSH_PUBLIC_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            private_key: lookup(ENV_PRIVATE_KEY).ok_or(ConfigError::Missing(ENV_PRIVATE_KEY))?,
            auth_secret: lookup(ENV_AUTH_SECRET).ok_or(ConfigError::Missing(ENV_AUTH_SECRET))?,
            public_key: lookup(ENV_PUBLIC_KEY),
        })
    }

    /// Read a JSON file with `private_key`, `auth_secret` and `public_key`
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Encode existing key material
    pub fn from_keys<K: KeyProvider>(keys: &K) -> Self {
        let key_pair = keys.key_pair();
        Self {
            private_key: URL_SAFE_NO_PAD.encode(key_pair.private_key().to_bytes()),
            auth_secret: URL_SAFE_NO_PAD.encode(keys.auth_secret().as_slice()),
            public_key: Some(URL_SAFE_NO_PAD.encode(key_pair.public_key_bytes())),
        }
    }

    /// Decode and validate into usable key material
    pub fn into_keys(self) -> Result<InstallationKeys, ConfigError> {
        let private_key = decode_field("private_key", &self.private_key)?;
        let auth_secret = decode_field("auth_secret", &self.auth_secret)?;
        let keys = InstallationKeys::from_bytes(&private_key, &auth_secret)?;

        if let Some(public_key) = &self.public_key {
            let public_key = decode_field("public_key", public_key)?;
            if public_key.as_slice() != keys.key_pair().public_key_bytes().as_slice() {
                return Err(ConfigError::PublicKeyMismatch);
            }
        }

        Ok(keys)
    }
}
