//! Web Push "aesgcm" notification decryption
//!
//! Recovers the JSON notification carried by an encrypted push message using
//! the legacy multi-header `aesgcm` content encoding:
//! - base-85 header fields `p` (ciphertext), `k` (sender key), `s` (salt)
//! - P-256 ECDH against the installation's static key
//! - two-stage HKDF-SHA256 keyed by the subscription auth secret
//! - AES-128-GCM with a length-prefixed padding block
//!
//! Every stage fails closed with a typed [`PushError`]; malformed or hostile
//! input never panics.
//!
//! # Example
//!
//! ```
//! use webpush_aesgcm::{encrypt, InstallationKeys, KeyProvider, PushDecryptor};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let keys = InstallationKeys::generate();
//!
//! // What the push server would send
//! let message = br#"{"access_token":"abc","notification_id":1,"notification_type":"mention","title":"T","body":"B"}"#;
//! let envelope = encrypt::seal(keys.key_pair().public_key_bytes(), keys.auth_secret(), message, 0)?;
//! let fields = envelope.to_header_fields();
//!
//! let record = PushDecryptor::new(keys).decrypt_fields(&fields.p, &fields.k, &fields.s)?;
//! assert_eq!(record.notification_id, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod aead;
pub mod codec;
pub mod config;
pub mod ecdh;
pub mod encrypt;
pub mod envelope;
mod error;
pub mod kdf;
mod keys;
pub mod padding;
mod pipeline;
mod record;
pub mod types;

pub use codec::{decode_header_field, encode_header_field, normalize_access_token, EncodingError};
pub use config::{ConfigError, KeyMaterialConfig};
pub use envelope::{HeaderFields, PushEnvelope};
pub use error::PushError;
pub use keys::{InstallationKeys, KeyProvider, StaticKeyPair};
pub use padding::strip_padding;
pub use pipeline::{decrypt, PushDecryptor};
pub use record::{NotificationKind, NotificationRecord};
pub use types::{AuthSecret, KeyError};
