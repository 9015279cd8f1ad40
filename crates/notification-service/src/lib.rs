//! Host-side delivery of decrypted push notifications
//!
//! Wraps the `webpush-aesgcm` pipeline with the pieces a notification host
//! needs: a completion that fires exactly once, best-effort content that can
//! be force-delivered when the host deadline expires, optional asynchronous
//! enrichment, and per-account badge counts.

pub mod badge;
pub mod completion;
pub mod config;
pub mod content;
pub mod delivery;
pub mod enrich;
pub mod handler;

pub use badge::BadgeCounter;
pub use completion::Completion;
pub use config::{ServiceConfig, ServiceConfigError};
pub use content::NotificationContent;
pub use delivery::Delivery;
pub use enrich::{Enricher, NoopEnricher};
pub use handler::{HandleOutcome, IncomingPush, NotificationHandler};
