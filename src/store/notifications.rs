//! Notification collection operations

use std::sync::Arc;

use super::EventStore;
use crate::error::StoreError;
use crate::types::Notification;

impl EventStore {
    /// Append to the log; a failed flush pops the entry again
    pub fn insert_notification(&self, notification: Notification) -> Result<Notification, StoreError> {
        self.mutate_with_undo(
            |data| {
                Arc::make_mut(&mut data.notifications).push(notification.clone());
                notification
            },
            |data| {
                Arc::make_mut(&mut data.notifications).pop();
            },
        )
    }

    /// Notifications for `username`, newest first
    ///
    /// Ties on `created_at` keep the later insertion first.
    pub fn notifications_for(&self, username: &str) -> Vec<Notification> {
        let mut found: Vec<Notification> = self.read(|data| {
            data.notifications
                .iter()
                .rev()
                .filter(|n| n.username == username)
                .cloned()
                .collect()
        });
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}
