//! Post-decryption enrichment
//!
//! Enrichment runs after the record is decrypted and races the host deadline.
//! An enricher that fails should return the content it was given.

use crate::content::NotificationContent;
use async_trait::async_trait;
use webpush_aesgcm::NotificationRecord;

#[async_trait]
pub trait Enricher: Send + Sync {
    /// Improve `content`, e.g. by downloading the icon as an attachment
    async fn enrich(
        &self,
        record: &NotificationRecord,
        content: NotificationContent,
    ) -> NotificationContent;
}

/// Delivers the decrypted content unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

#[async_trait]
impl Enricher for NoopEnricher {
    async fn enrich(
        &self,
        _record: &NotificationRecord,
        content: NotificationContent,
    ) -> NotificationContent {
        content
    }
}

#[async_trait]
impl<E: Enricher + ?Sized> Enricher for std::sync::Arc<E> {
    async fn enrich(
        &self,
        record: &NotificationRecord,
        content: NotificationContent,
    ) -> NotificationContent {
        (**self).enrich(record, content).await
    }
}
