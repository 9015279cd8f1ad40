//! Installation key material and the key provider capability

use crate::types::{AuthSecret, KeyError, PUBLIC_KEY_LEN};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};

/// Static P-256 key-agreement key pair of this installation
#[derive(Clone)]
pub struct StaticKeyPair {
    private_key: SecretKey,
    public_key: PublicKey,
    public_key_bytes: [u8; PUBLIC_KEY_LEN],
}

impl StaticKeyPair {
    /// Create from existing private key bytes (32-byte big-endian scalar)
    pub fn from_private_key_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != 32 {
            return Err(KeyError::InvalidLength {
                expected: 32,
                got: bytes.len(),
            });
        }
        let private_key =
            SecretKey::from_slice(bytes).map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_secret_key(private_key))
    }

    /// Generate a new random key pair
    pub fn generate() -> Self {
        use rand::rngs::OsRng;
        Self::from_secret_key(SecretKey::random(&mut OsRng))
    }

    fn from_secret_key(private_key: SecretKey) -> Self {
        let public_key = private_key.public_key();
        let mut public_key_bytes = [0u8; PUBLIC_KEY_LEN];
        public_key_bytes.copy_from_slice(public_key.to_encoded_point(false).as_bytes());

        Self {
            private_key,
            public_key,
            public_key_bytes,
        }
    }

    /// Get the private key
    pub fn private_key(&self) -> &SecretKey {
        &self.private_key
    }

    /// Get the public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Uncompressed SEC1 encoding of the public key (0x04 || X || Y)
    pub fn public_key_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key_bytes
    }
}

impl std::fmt::Debug for StaticKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Source of the installation-wide key material
///
/// The pipeline only ever reads through this trait, so hosts can back it with
/// a keychain, a config file, or fixed test vectors.
pub trait KeyProvider {
    /// The receiver's static key pair
    fn key_pair(&self) -> &StaticKeyPair;

    /// The subscription auth secret
    fn auth_secret(&self) -> &AuthSecret;
}

/// Owned key material for one installation
#[derive(Clone)]
pub struct InstallationKeys {
    key_pair: StaticKeyPair,
    auth_secret: AuthSecret,
}

impl InstallationKeys {
    pub fn new(key_pair: StaticKeyPair, auth_secret: AuthSecret) -> Self {
        Self {
            key_pair,
            auth_secret,
        }
    }

    /// Build from a raw private key scalar and a raw auth secret
    pub fn from_bytes(private_key: &[u8], auth_secret: &[u8]) -> Result<Self, KeyError> {
        Ok(Self::new(
            StaticKeyPair::from_private_key_bytes(private_key)?,
            AuthSecret::from_slice(auth_secret)?,
        ))
    }

    /// Generate fresh key material (subscription setup, tests)
    pub fn generate() -> Self {
        use rand::{rngs::OsRng, RngCore};
        let mut secret = [0u8; 16];
        OsRng.fill_bytes(&mut secret);
        Self::new(StaticKeyPair::generate(), AuthSecret::from(secret))
    }
}

impl KeyProvider for InstallationKeys {
    fn key_pair(&self) -> &StaticKeyPair {
        &self.key_pair
    }

    fn auth_secret(&self) -> &AuthSecret {
        &self.auth_secret
    }
}

impl<K: KeyProvider + ?Sized> KeyProvider for &K {
    fn key_pair(&self) -> &StaticKeyPair {
        (**self).key_pair()
    }

    fn auth_secret(&self) -> &AuthSecret {
        (**self).auth_secret()
    }
}

impl<K: KeyProvider + ?Sized> KeyProvider for std::sync::Arc<K> {
    fn key_pair(&self) -> &StaticKeyPair {
        (**self).key_pair()
    }

    fn auth_secret(&self) -> &AuthSecret {
        (**self).auth_secret()
    }
}

impl std::fmt::Debug for InstallationKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationKeys")
            .field("key_pair", &self.key_pair)
            .finish_non_exhaustive()
    }
}
