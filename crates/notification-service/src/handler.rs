//! Turns one incoming push into exactly one delivered notification

use crate::badge::BadgeCounter;
use crate::content::NotificationContent;
use crate::delivery::Delivery;
use crate::enrich::{Enricher, NoopEnricher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use webpush_aesgcm::{HeaderFields, KeyProvider, PushDecryptor};

/// An encrypted push as relayed to the device
///
/// `title` and `body` are the visible placeholder the push server attached,
/// used when decryption fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingPush {
    #[serde(flatten)]
    pub fields: HeaderFields,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl IncomingPush {
    pub fn fallback_content(&self) -> NotificationContent {
        NotificationContent::fallback(self.title.as_deref(), self.body.as_deref())
    }
}

/// How a [`NotificationHandler::handle`] call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Enrichment finished before the deadline
    Enriched,
    /// Deadline hit during enrichment; decrypted content was delivered
    DeadlineExpired,
    /// Decryption failed; fallback content was delivered
    Fallback,
    /// Someone else (usually the host timeout) completed the delivery first
    AlreadyCompleted,
}

pub struct NotificationHandler<K, E = NoopEnricher> {
    decryptor: PushDecryptor<K>,
    enricher: E,
    badges: Arc<BadgeCounter>,
    deadline: Duration,
}

impl<K: KeyProvider> NotificationHandler<K> {
    pub fn new(keys: K, deadline: Duration) -> Self {
        Self {
            decryptor: PushDecryptor::new(keys),
            enricher: NoopEnricher,
            badges: Arc::new(BadgeCounter::new()),
            deadline,
        }
    }
}

impl<K: KeyProvider, E: Enricher> NotificationHandler<K, E> {
    pub fn with_enricher<E2: Enricher>(self, enricher: E2) -> NotificationHandler<K, E2> {
        NotificationHandler {
            decryptor: self.decryptor,
            enricher,
            badges: self.badges,
            deadline: self.deadline,
        }
    }

    /// Share a badge counter with other handlers of the same process
    pub fn with_badges(mut self, badges: Arc<BadgeCounter>) -> Self {
        self.badges = badges;
        self
    }

    pub fn badges(&self) -> &Arc<BadgeCounter> {
        &self.badges
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Decrypt, enrich and deliver `push`
    ///
    /// `delivery` is completed exactly once on every path. If this future is
    /// dropped before it finishes, the best effort so far is delivered.
    pub async fn handle(&self, push: &IncomingPush, delivery: Delivery) -> HandleOutcome {
        let delivery = scopeguard::guard(delivery, |delivery| {
            if delivery.expire() {
                warn!("Notification handling cancelled, delivered best effort");
            }
        });

        let record = match self.decryptor.decrypt_header_fields(&push.fields) {
            Ok(record) => record,
            Err(e) => {
                warn!(stage = e.stage(), "Push decryption failed: {}", e);
                return if delivery.finish(push.fallback_content()) {
                    HandleOutcome::Fallback
                } else {
                    HandleOutcome::AlreadyCompleted
                };
            }
        };

        let mut content = NotificationContent::from_record(&record);
        content.badge = Some(self.badges.increment(&record.normalized_access_token()));
        delivery.improve(content.clone());
        let kind = record.kind();
        debug!(
            notification_id = record.notification_id,
            kind = kind.as_str(),
            "Push decrypted"
        );

        tokio::select! {
            enriched = self.enricher.enrich(&record, content) => {
                if delivery.finish(enriched) {
                    info!(
                        notification_id = record.notification_id,
                        "Delivered enriched notification"
                    );
                    HandleOutcome::Enriched
                } else {
                    HandleOutcome::AlreadyCompleted
                }
            }
            _ = tokio::time::sleep(self.deadline) => {
                if delivery.expire() {
                    warn!(
                        notification_id = record.notification_id,
                        "Enrichment exceeded {:?}, delivered without it",
                        self.deadline
                    );
                    HandleOutcome::DeadlineExpired
                } else {
                    HandleOutcome::AlreadyCompleted
                }
            }
        }
    }
}
