//! Best-effort delivery bound to a single completion

use crate::completion::Completion;
use crate::content::NotificationContent;
use std::sync::{Arc, Mutex};

/// One notification on its way to the host
///
/// Holds the best content known so far so that a host timeout can force
/// delivery at any point. Clones share state.
#[derive(Debug, Clone)]
pub struct Delivery {
    completion: Completion<NotificationContent>,
    best_effort: Arc<Mutex<NotificationContent>>,
}

impl Delivery {
    /// Start with `initial` as the best effort, normally the fallback content
    pub fn new(completion: Completion<NotificationContent>, initial: NotificationContent) -> Self {
        Self {
            completion,
            best_effort: Arc::new(Mutex::new(initial)),
        }
    }

    /// Replace the best-effort content; ignored once completed
    pub fn improve(&self, content: NotificationContent) {
        if self.completion.is_completed() {
            return;
        }
        *self.lock() = content;
    }

    /// Complete with final content
    pub fn finish(&self, content: NotificationContent) -> bool {
        self.completion.complete(content)
    }

    /// Host timeout: complete with whatever is available
    pub fn expire(&self) -> bool {
        let content = self.best_effort();
        self.completion.complete(content)
    }

    pub fn best_effort(&self) -> NotificationContent {
        self.lock().clone()
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_completed()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotificationContent> {
        self.best_effort
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str) -> NotificationContent {
        NotificationContent::fallback(Some(title), None)
    }

    #[tokio::test]
    async fn test_expire_delivers_best_effort() {
        let (completion, rx) = Completion::channel();
        let delivery = Delivery::new(completion, content("fallback"));

        delivery.improve(content("decrypted"));
        assert!(delivery.expire());
        assert!(!delivery.finish(content("enriched")));

        assert_eq!(rx.await.unwrap().title, "decrypted");
    }

    #[tokio::test]
    async fn test_finish_then_expire() {
        let (completion, rx) = Completion::channel();
        let delivery = Delivery::new(completion, content("fallback"));

        assert!(delivery.finish(content("enriched")));
        assert!(delivery.is_completed());
        assert!(!delivery.expire());

        assert_eq!(rx.await.unwrap().title, "enriched");
    }

    #[test]
    fn test_improve_after_completion_is_ignored() {
        let (completion, _rx) = Completion::channel();
        let delivery = Delivery::new(completion, content("fallback"));

        delivery.expire();
        delivery.improve(content("late"));
        assert_eq!(delivery.best_effort().title, "fallback");
    }
}
