//! Shared fixtures for the integration tests
//!
//! The receiver key pair and auth secret are the ones published with the
//! draft-ietf-webpush-encryption-04 example message.

#![allow(dead_code)]

use webpush_aesgcm::{HeaderFields, InstallationKeys, KeyMaterialConfig};

pub const RECEIVER_PRIVATE_KEY: &str = "9FWl15_QUQAWDaD3k3l50ZBZQJ4au27F1V4F0uLSD_M";
pub const RECEIVER_PUBLIC_KEY: &str =
    "BCEkBjzL8Z3C-oi2Q7oE5t2Np-p7osjGLg93qUP0wvqRT21EEWyf0cQDQcakQMqz4hQKYOQ3il2nNZct4HgAUQU";
pub const AUTH_SECRET: &str = "R29vIGdvbyBnJyBqb29iIQ";

/// Draft example: "I am the walrus" with no padding, as base-85 header fields
pub const WALRUS_P: &str = "(uW$DlJ(@[yqViUL3Yi9ry$tk+3}kyDDhA)-v=znkM";
pub const WALRUS_K: &str =
    "1LKB%W/26CRT+j1<rnJOW5QxNIpUSSEq{3hqPef)i%*-CJE7{y=kJ-08BExm2b@yAO}xj*(SR[vKnk@eBP";
pub const WALRUS_S: &str = "MuTsIYO.9Vbk4M6-F9Dq";

/// Mention notification encrypted to the receiver with ephemeral scalar
/// 0x0102..20 and salt 0x00..0f
pub const MENTION_P: &str = "DEzf1yadRzITHm8d!WVNkxC>J{&TCnMn:q+Xu1:J@)^m8u#c$m56%tj)fgF:Q5tERm^%N.^/$zt2m7lMCtuTqf<c7wO<Wj[/*}B4h1bqvaqJlz+XwJnStnls(#@!(-Sn)QSY292B6ky{h*r7p:]";
pub const MENTION_K: &str =
    "1w@z!zN[![XDHyX+70y?+).CMM+LE++28u?RO/+yuQV(!i-bz+}$W6UsPUrvp+g#zskY3oVDJUR[Qm3[q#";
pub const MENTION_S: &str = "009c61o!#m2NH?C3>iWS";
pub const MENTION_JSON: &[u8] = br#"{"access_token":"abc123","notification_id":42,"notification_type":"mention","title":"T","body":"B"}"#;

pub fn ephemeral_scalar() -> [u8; 32] {
    let mut scalar = [0u8; 32];
    for (i, byte) in scalar.iter_mut().enumerate() {
        *byte = i as u8 + 1;
    }
    scalar
}

pub fn mention_salt() -> [u8; 16] {
    let mut salt = [0u8; 16];
    for (i, byte) in salt.iter_mut().enumerate() {
        *byte = i as u8;
    }
    salt
}

/// Receiver key material, checked against the published public key
pub fn receiver_keys() -> InstallationKeys {
    KeyMaterialConfig {
        private_key: RECEIVER_PRIVATE_KEY.to_string(),
        auth_secret: AUTH_SECRET.to_string(),
        public_key: Some(RECEIVER_PUBLIC_KEY.to_string()),
    }
    .into_keys()
    .expect("fixture key material is valid")
}

pub fn walrus_fields() -> HeaderFields {
    HeaderFields {
        p: WALRUS_P.to_string(),
        k: WALRUS_K.to_string(),
        s: WALRUS_S.to_string(),
    }
}

pub fn mention_fields() -> HeaderFields {
    HeaderFields {
        p: MENTION_P.to_string(),
        k: MENTION_K.to_string(),
        s: MENTION_S.to_string(),
    }
}
