//! Content handed to the host for display

use serde::{Deserialize, Serialize};
use webpush_aesgcm::NotificationRecord;

/// Title shown when the push could not be decrypted and carried none
pub const DEFAULT_FALLBACK_TITLE: &str = "New notification";

/// A displayable notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Remote icon to fetch during enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    /// Local attachment produced by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,

    /// Groups notifications of one account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,

    /// False for undecrypted fallback content
    pub decrypted: bool,
}

impl NotificationContent {
    pub fn from_record(record: &NotificationRecord) -> Self {
        Self {
            title: record.title.clone(),
            body: record.body.clone(),
            subtitle: None,
            locale: record.preferred_locale.clone(),
            icon_url: record.icon_url.clone(),
            attachment: None,
            thread_id: Some(record.normalized_access_token()),
            category: Some(record.kind().as_str().to_string()),
            notification_id: Some(record.notification_id),
            badge: None,
            decrypted: true,
        }
    }

    /// Content delivered when decryption fails
    pub fn fallback(title: Option<&str>, body: Option<&str>) -> Self {
        Self {
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_FALLBACK_TITLE)
                .to_string(),
            body: body.unwrap_or_default().to_string(),
            subtitle: None,
            locale: None,
            icon_url: None,
            attachment: None,
            thread_id: None,
            category: None,
            notification_id: None,
            badge: None,
            decrypted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let record = NotificationRecord::parse(
            br#"{"access_token":"dG9rZW4","notification_id":7,"notification_type":"follow","preferred_locale":"ja","icon":"https://example.social/a.png","title":"T","body":"B"}"#,
        )
        .unwrap();

        let content = NotificationContent::from_record(&record);
        assert_eq!(content.title, "T");
        assert_eq!(content.body, "B");
        assert_eq!(content.locale.as_deref(), Some("ja"));
        assert_eq!(content.icon_url.as_deref(), Some("https://example.social/a.png"));
        assert_eq!(content.thread_id.as_deref(), Some("dG9rZW4="));
        assert_eq!(content.category.as_deref(), Some("follow"));
        assert_eq!(content.notification_id, Some(7));
        assert!(content.decrypted);
    }

    #[test]
    fn test_fallback() {
        let content = NotificationContent::fallback(None, None);
        assert_eq!(content.title, DEFAULT_FALLBACK_TITLE);
        assert_eq!(content.body, "");
        assert!(!content.decrypted);

        let content =
            NotificationContent::fallback(Some("Mastodon"), Some("You have a new notification"));
        assert_eq!(content.title, "Mastodon");
        assert_eq!(content.body, "You have a new notification");

        assert_eq!(
            NotificationContent::fallback(Some(""), None).title,
            DEFAULT_FALLBACK_TITLE
        );
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let json = serde_json::to_value(NotificationContent::fallback(None, Some("b"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": DEFAULT_FALLBACK_TITLE, "body": "b", "decrypted": false })
        );
    }
}
