//! Single-shot completion token

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

type Callback<T> = Box<dyn FnOnce(T) + Send>;

struct Inner<T> {
    completed: AtomicBool,
    callback: Mutex<Option<Callback<T>>>,
}

/// Hands a value to the host exactly once
///
/// Clones share state. The first [`complete`](Completion::complete) call wins
/// the compare-and-set and runs the callback; every later call is a no-op.
pub struct Completion<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("completed", &self.is_completed())
            .finish()
    }
}

impl<T: Send + 'static> Completion<T> {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                completed: AtomicBool::new(false),
                callback: Mutex::new(Some(Box::new(callback))),
            }),
        }
    }

    /// Completion that forwards its value to a oneshot receiver
    pub fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let completion = Self::new(move |value| {
            // Receiver gone means the host stopped waiting
            let _ = tx.send(value);
        });
        (completion, rx)
    }
}

impl<T> Completion<T> {
    /// Deliver `value`, returning whether this call was the one that did
    pub fn complete(&self, value: T) -> bool {
        if self
            .inner
            .completed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let callback = self
            .inner
            .callback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(callback) = callback {
            callback(value);
        }
        true
    }

    pub fn is_completed(&self) -> bool {
        self.inner.completed.load(Ordering::Acquire)
    }
}
