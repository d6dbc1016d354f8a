//! # Notifications
//!
//! A single-slot holder for the transient banner shown after an add or edit.
//! Showing a message replaces whatever is pending; there is no queue. Each message
//! expires on its own after the configured time-to-live unless it was dismissed or
//! replaced first.
//!
//! Observers hold a [`watch::Receiver`] and re-render whenever the slot changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

/// Severity or category for user-visible notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => f.write_str("success"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A notification payload intended for the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub text: String,
    seq: u64,
}

/// Cloneable handle to the notification slot. Clones share the same slot.
#[derive(Clone)]
pub struct Notifier {
    slot: Arc<watch::Sender<Option<Notification>>>,
    next_seq: Arc<AtomicU64>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            next_seq: Arc::new(AtomicU64::new(1)),
            ttl,
        }
    }

    /// Replaces the pending message and schedules its expiry.
    ///
    /// Expiry needs a tokio runtime; outside one the message stays until cleared.
    pub fn show(&self, severity: Severity, text: impl Into<String>) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            severity,
            text: text.into(),
            seq,
        };
        info!(severity = %notification.severity, text = %notification.text, "Notification shown");
        self.slot.send_replace(Some(notification));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let slot = Arc::clone(&self.slot);
                let ttl = self.ttl;
                handle.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    let expired = slot.send_if_modified(|current| {
                        if current.as_ref().is_some_and(|n| n.seq == seq) {
                            *current = None;
                            true
                        } else {
                            false
                        }
                    });
                    if expired {
                        debug!(seq, "Notification expired");
                    }
                });
            }
            Err(_) => debug!("No runtime available, notification will not expire"),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(Severity::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(Severity::Error, text);
    }

    /// Dismisses the pending message, if any.
    pub fn clear(&self) {
        self.slot.send_if_modified(|current| current.take().is_some());
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().clone()
    }

    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }
}
