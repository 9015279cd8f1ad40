//! AES-128-GCM open/seal for aesgcm payloads
//!
//! The wire ciphertext already carries its trailing 16-byte tag; no separate
//! tag field is transmitted.

use crate::error::PushError;
use crate::types::{ContentKey, Nonce96};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes128Gcm, Key, Nonce,
};

/// GCM authentication tag length
pub const TAG_LEN: usize = 16;

fn create_cipher(key: &ContentKey) -> Aes128Gcm {
    Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(key.as_slice()))
}

/// Decrypt and authenticate `ciphertext || tag`
///
/// Any failure, including input shorter than the tag, is reported as
/// [`PushError::AuthenticationFailed`] with no further detail.
pub fn open(
    nonce: &Nonce96,
    key: &ContentKey,
    ciphertext_with_tag: &[u8],
) -> Result<Vec<u8>, PushError> {
    if ciphertext_with_tag.len() < TAG_LEN {
        return Err(PushError::AuthenticationFailed);
    }
    create_cipher(key)
        .decrypt(Nonce::from_slice(nonce.as_slice()), ciphertext_with_tag)
        .map_err(|_| PushError::AuthenticationFailed)
}

/// Encrypt, returning `ciphertext || tag`
pub fn seal(nonce: &Nonce96, key: &ContentKey, plaintext: &[u8]) -> Result<Vec<u8>, PushError> {
    create_cipher(key)
        .encrypt(Nonce::from_slice(nonce.as_slice()), plaintext)
        .map_err(|_| PushError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> (Nonce96, ContentKey) {
        (Nonce96([0x24; 12]), ContentKey([0x42; 16]))
    }

    #[test]
    fn test_seal_open() {
        let (nonce, key) = material();
        let sealed = seal(&nonce, &key, b"\x00\x00hello").unwrap();
        assert_eq!(sealed.len(), 7 + TAG_LEN);
        assert_eq!(open(&nonce, &key, &sealed).unwrap(), b"\x00\x00hello");
    }

    #[test]
    fn test_draft_example_ciphertext() {
        // Content key and nonce of the draft-ietf-webpush-encryption-04 example
        let key =
            ContentKey::from_slice(&hex::decode("00ddbec61bc559e621e73d1f703bb45b").unwrap())
                .unwrap();
        let nonce = Nonce96::from_slice(&hex::decode("258d4e930e6bc350eb920f49").unwrap()).unwrap();
        let ciphertext = base64::Engine::decode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            "6nqAQUME8hNqw5J3kl8cpVVJylXKYqZOeseZG8UueKpA",
        )
        .unwrap();

        assert_eq!(open(&nonce, &key, &ciphertext).unwrap(), b"\x00\x00I am the walrus");
    }

    #[test]
    fn test_tampered_tag_fails() {
        let (nonce, key) = material();
        let mut sealed = seal(&nonce, &key, b"payload").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(matches!(
            open(&nonce, &key, &sealed).unwrap_err(),
            PushError::AuthenticationFailed
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let (nonce, key) = material();
        let sealed = seal(&nonce, &key, b"payload").unwrap();
        let other = ContentKey([0x43; 16]);
        assert!(open(&nonce, &other, &sealed).is_err());
    }

    #[test]
    fn test_short_input_fails() {
        let (nonce, key) = material();
        assert!(matches!(
            open(&nonce, &key, &[0u8; 15]).unwrap_err(),
            PushError::AuthenticationFailed
        ));
        assert!(open(&nonce, &key, &[]).is_err());
    }
}
