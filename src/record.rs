//! Decrypted notification record

use crate::codec::{normalize_access_token, to_standard_base64, EncodingError};
use crate::error::PushError;
use serde::{Deserialize, Serialize};

/// Notification decoded from the decrypted payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Access token of the account the notification belongs to, as sent
    pub access_token: String,

    pub notification_id: i64,

    pub notification_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_locale: Option<String>,

    #[serde(rename = "icon", default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    pub title: String,

    pub body: String,
}

/// Known notification kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Mention,
    Status,
    Reblog,
    Follow,
    FollowRequest,
    Favourite,
    Poll,
    Update,
    AdminSignUp,
    AdminReport,
    Other(String),
}

impl NotificationKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "mention" => Self::Mention,
            "status" => Self::Status,
            "reblog" => Self::Reblog,
            "follow" => Self::Follow,
            "follow_request" => Self::FollowRequest,
            "favourite" => Self::Favourite,
            "poll" => Self::Poll,
            "update" => Self::Update,
            "admin.sign_up" => Self::AdminSignUp,
            "admin.report" => Self::AdminReport,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Mention => "mention",
            Self::Status => "status",
            Self::Reblog => "reblog",
            Self::Follow => "follow",
            Self::FollowRequest => "follow_request",
            Self::Favourite => "favourite",
            Self::Poll => "poll",
            Self::Update => "update",
            Self::AdminSignUp => "admin.sign_up",
            Self::AdminReport => "admin.report",
            Self::Other(other) => other,
        }
    }
}

impl NotificationRecord {
    /// Parse the JSON message left after padding removal
    pub fn parse(payload: &[u8]) -> Result<Self, PushError> {
        serde_json::from_slice(payload).map_err(|e| PushError::InvalidRecord(e.to_string()))
    }

    /// Classified `notification_type`
    pub fn kind(&self) -> NotificationKind {
        NotificationKind::parse(&self.notification_type)
    }

    /// Access token rewritten as padded standard base64
    ///
    /// Stable per account, so it keys per-account state such as badge counts.
    pub fn normalized_access_token(&self) -> String {
        to_standard_base64(&self.access_token)
    }

    /// Raw bytes of the access token
    pub fn access_token_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        normalize_access_token(&self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let payload = br#"{
            "access_token": "dG9rZW4",
            "notification_id": 108,
            "notification_type": "favourite",
            "preferred_locale": "de",
            "icon": "https://example.social/avatar.png",
            "title": "Alice favourited your post",
            "body": "hello"
        }"#;

        let record = NotificationRecord::parse(payload).unwrap();
        assert_eq!(record.access_token, "dG9rZW4");
        assert_eq!(record.notification_id, 108);
        assert_eq!(record.kind(), NotificationKind::Favourite);
        assert_eq!(record.preferred_locale.as_deref(), Some("de"));
        assert_eq!(
            record.icon_url.as_deref(),
            Some("https://example.social/avatar.png")
        );
        assert_eq!(record.access_token_bytes().unwrap(), b"token");
        assert_eq!(record.normalized_access_token(), "dG9rZW4=");
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let payload = br#"{"access_token":"abc123","notification_id":42,"notification_type":"mention","title":"T","body":"B"}"#;
        let record = NotificationRecord::parse(payload).unwrap();
        assert_eq!(record.preferred_locale, None);
        assert_eq!(record.icon_url, None);
        assert_eq!(record.kind(), NotificationKind::Mention);
    }

    #[test]
    fn test_null_optional_fields() {
        let payload = br#"{"access_token":"a","notification_id":1,"notification_type":"poll","preferred_locale":null,"icon":null,"title":"","body":""}"#;
        let record = NotificationRecord::parse(payload).unwrap();
        assert!(record.icon_url.is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let payload = br#"{"access_token":"abc","notification_id":1,"notification_type":"mention","title":"T"}"#;
        let err = NotificationRecord::parse(payload).unwrap_err();
        assert!(matches!(err, PushError::InvalidRecord(_)));
    }

    #[test]
    fn test_wrong_field_type() {
        let payload = br#"{"access_token":"abc","notification_id":"1","notification_type":"mention","title":"T","body":"B"}"#;
        assert!(matches!(
            NotificationRecord::parse(payload).unwrap_err(),
            PushError::InvalidRecord(_)
        ));

        let payload = br#"{"access_token":7,"notification_id":1,"notification_type":"mention","title":"T","body":"B"}"#;
        assert!(NotificationRecord::parse(payload).is_err());
    }

    #[test]
    fn test_invalid_utf8_and_json() {
        assert!(NotificationRecord::parse(&[0xFF, 0xFE]).is_err());
        assert!(NotificationRecord::parse(b"").is_err());
        assert!(NotificationRecord::parse(b"[]").is_err());
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            NotificationKind::parse("quote"),
            NotificationKind::Other("quote".to_string())
        );
        assert_eq!(NotificationKind::parse("admin.report").as_str(), "admin.report");
    }
}
