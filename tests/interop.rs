mod common;

use common::*;
use p256::SecretKey;
use webpush_aesgcm::encrypt::seal_with;
use webpush_aesgcm::{KeyProvider, NotificationRecord, PushDecryptor, PushEnvelope};

#[test]
fn test_draft_example_plaintext() -> Result<(), Box<dyn std::error::Error>> {
    let decryptor = PushDecryptor::new(receiver_keys());
    let envelope = PushEnvelope::try_from(&walrus_fields())?;

    let payload = decryptor.decrypt_payload(&envelope)?;
    assert_eq!(payload, b"I am the walrus");
    Ok(())
}

#[test]
fn test_draft_example_is_not_a_record() {
    let decryptor = PushDecryptor::new(receiver_keys());
    let err = decryptor.decrypt_header_fields(&walrus_fields()).unwrap_err();
    assert_eq!(err.stage(), "record");
}

#[test]
fn test_mention_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let decryptor = PushDecryptor::new(receiver_keys());
    let record = decryptor.decrypt_fields(MENTION_P, MENTION_K, MENTION_S)?;

    assert_eq!(
        record,
        NotificationRecord {
            access_token: "abc123".to_string(),
            notification_id: 42,
            notification_type: "mention".to_string(),
            preferred_locale: None,
            icon_url: None,
            title: "T".to_string(),
            body: "B".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_encryptor_reproduces_reference_fields() -> Result<(), Box<dyn std::error::Error>> {
    let keys = receiver_keys();
    let ephemeral = SecretKey::from_slice(&ephemeral_scalar())?;

    let envelope = seal_with(
        &ephemeral,
        mention_salt(),
        keys.key_pair().public_key_bytes(),
        keys.auth_secret(),
        MENTION_JSON,
        0,
    )?;

    assert_eq!(envelope.to_header_fields(), mention_fields());
    Ok(())
}

#[test]
fn test_header_fields_from_json_metadata() -> Result<(), Box<dyn std::error::Error>> {
    // Shape of the custom keys in a relayed notification's metadata
    let metadata = serde_json::json!({
        "p": MENTION_P,
        "k": MENTION_K,
        "s": MENTION_S,
        "aps": { "alert": { "title": "New notification" }, "mutable-content": 1 }
    });
    let fields: webpush_aesgcm::HeaderFields = serde_json::from_value(metadata)?;

    let record = PushDecryptor::new(receiver_keys()).decrypt_header_fields(&fields)?;
    assert_eq!(record.notification_type, "mention");
    assert_eq!(record.normalized_access_token(), "abc123==");
    Ok(())
}
