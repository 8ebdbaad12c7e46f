//! Thread-safe message accumulator for parallel restore workers.

use crate::message::RestoreMessage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An append-only accumulator for messages recorded during one restore.
///
/// Multiple threads can record messages concurrently via [`record`](Self::record).
/// Each producer's messages keep their relative order; messages from different
/// producers interleave in arrival order. Identical messages are stored as
/// many times as they are recorded.
///
/// Reads go through [`snapshot`](Self::snapshot), which copies the current
/// contents, so callers never hold on to the live store.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    messages: Mutex<Vec<RestoreMessage>>,
    error_count: AtomicUsize,
}

impl ErrorCollector {
    /// Creates a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message.
    ///
    /// If the message has [`Level::Error`](crate::Level::Error), the error
    /// count is incremented atomically.
    pub fn record(&self, message: RestoreMessage) {
        if message.level.is_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.lock().push(message);
    }

    /// Returns a copy of every message recorded so far.
    pub fn snapshot(&self) -> Vec<RestoreMessage> {
        self.lock().clone()
    }

    /// Takes all recorded messages, leaving the collector empty.
    pub fn take_all(&self) -> Vec<RestoreMessage> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the number of messages currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no messages are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if any error-level message has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Returns the number of error-level messages recorded so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RestoreMessage>> {
        // A push never leaves the vector half-written, so a poisoned lock
        // still guards consistent data.
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
