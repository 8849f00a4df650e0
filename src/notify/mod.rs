//! Notification Sink - persisted per-user messages with live fan-out
//!
//! Every notification is written to the store first, then pushed on a
//! broadcast channel. Push delivery is best-effort: with no subscribers the
//! message is simply dropped from the channel, the stored copy remains.

mod messages;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};

use crate::error::StoreError;
use crate::store::EventStore;
use crate::types::Notification;
use crate::utils::current_timestamp;

pub use messages::{ClientMessage, LaggedMessage, PongMessage, PushMessage, WelcomeMessage};

/// Default channel buffer; slower subscribers lag and are told to refresh
pub const DEFAULT_CAPACITY: usize = 1024;

/// Persists notifications and broadcasts them to live listeners
pub struct NotificationSink {
    store: Arc<EventStore>,
    tx: broadcast::Sender<PushMessage>,
    sequence_counter: AtomicU64,
}

impl NotificationSink {
    pub fn new(store: Arc<EventStore>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            store,
            tx,
            sequence_counter: AtomicU64::new(0),
        }
    }

    /// Record `message` for `username` and push it to subscribers
    pub fn notify(&self, username: &str, message: impl Into<String>) -> Result<Notification, StoreError> {
        let notification = Notification::new(username, message, current_timestamp());
        let stored = self.store.insert_notification(notification)?;

        let seq = self.sequence_counter.fetch_add(1, Ordering::SeqCst);
        let delivered = self
            .tx
            .send(PushMessage::new(stored.clone(), seq))
            .unwrap_or(0);
        tracing::debug!(username, sequence_id = seq, listeners = delivered, "notification sent");

        Ok(stored)
    }

    /// Stored notifications for `username`, newest first
    pub fn list(&self, username: &str) -> Vec<Notification> {
        self.store.notifications_for(username)
    }

    /// Subscribe to receive pushed notifications
    pub fn subscribe(&self) -> broadcast::Receiver<PushMessage> {
        self.tx.subscribe()
    }

    /// Subscribe to notifications for `username`, or to all with `None`
    pub fn listen(&self, username: Option<String>) -> Listener {
        Listener {
            rx: self.subscribe(),
            username,
        }
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }
}

/// Next thing a listener should be told
#[derive(Debug, Clone)]
pub enum Delivery {
    Notification(PushMessage),
    /// The listener fell this many notifications behind
    Lagged(u64),
}

/// A subscription filtered to one user's notifications
pub struct Listener {
    rx: broadcast::Receiver<PushMessage>,
    username: Option<String>,
}

impl Listener {
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Wait for the next delivery, skipping other users' notifications
    ///
    /// Returns `None` once the sink is dropped. Cancel-safe.
    pub async fn next(&mut self) -> Option<Delivery> {
        loop {
            match self.rx.recv().await {
                Ok(msg) if msg.is_for(self.username.as_deref()) => {
                    return Some(Delivery::Notification(msg))
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(missed)) => return Some(Delivery::Lagged(missed)),
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_notify_persists_and_broadcasts() {
        let store = Arc::new(EventStore::in_memory());
        let sink = NotificationSink::new(store.clone(), 16);
        let mut rx = sink.subscribe();

        sink.notify("alice", "You joined Beach Cleanup").unwrap();

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.sequence_id, 0);
        assert_eq!(msg.notification.username, "alice");
        assert_eq!(store.notifications_for("alice").len(), 1);
        assert_eq!(sink.current_sequence_id(), 1);
    }

    #[tokio::test]
    async fn test_listener_only_sees_own_notifications() {
        let store = Arc::new(EventStore::in_memory());
        let sink = NotificationSink::new(store, 16);
        let mut alice = sink.listen(Some("alice".to_string()));
        let mut everyone = sink.listen(None);

        sink.notify("bob", "You joined Jazz Night").unwrap();
        sink.notify("alice", "You joined Beach Cleanup").unwrap();

        match alice.next().await {
            Some(Delivery::Notification(msg)) => {
                assert_eq!(msg.notification.username, "alice");
                assert_eq!(msg.sequence_id, 1);
            }
            other => panic!("expected alice's notification, got {other:?}"),
        }
        match everyone.next().await {
            Some(Delivery::Notification(msg)) => assert_eq!(msg.notification.username, "bob"),
            other => panic!("expected bob's notification, got {other:?}"),
        }

        sink.notify("bob", "Jazz Night starts soon").unwrap();
        let pending = tokio::time::timeout(Duration::from_millis(50), alice.next()).await;
        assert!(pending.is_err(), "bob's notification reached alice");
    }

    #[tokio::test]
    async fn test_listener_reports_lag() {
        let store = Arc::new(EventStore::in_memory());
        let sink = NotificationSink::new(store, 2);
        let mut listener = sink.listen(None);

        for i in 0..4 {
            sink.notify("alice", format!("message {i}")).unwrap();
        }

        assert!(matches!(listener.next().await, Some(Delivery::Lagged(2))));
        match listener.next().await {
            Some(Delivery::Notification(msg)) => assert_eq!(msg.sequence_id, 2),
            other => panic!("expected a notification, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_listener_ends_with_sink() {
        let store = Arc::new(EventStore::in_memory());
        let sink = NotificationSink::new(store, 2);
        let mut listener = sink.listen(Some("alice".to_string()));

        drop(sink);
        assert!(listener.next().await.is_none());
    }

    #[test]
    fn test_notify_without_listeners_is_ok() {
        let store = Arc::new(EventStore::in_memory());
        let sink = NotificationSink::new(store, 16);

        sink.notify("bob", "hello").unwrap();
        assert_eq!(sink.list("bob")[0].message, "hello");
    }
}
