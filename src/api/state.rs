//! Shared application state for HTTP and WebSocket handlers

use std::sync::Arc;

use crate::config::Config;
use crate::notify::{NotificationSink, DEFAULT_CAPACITY};
use crate::store::EventStore;

/// State handed to every handler
pub struct AppState {
    /// The document store
    pub store: Arc<EventStore>,

    /// Notification persistence and push channel
    pub notifier: Arc<NotificationSink>,

    /// bcrypt cost for new passwords
    pub password_cost: u32,
}

impl AppState {
    /// Create state around `store` with default channel capacity and cost
    pub fn new(store: Arc<EventStore>) -> Self {
        let notifier = Arc::new(NotificationSink::new(store.clone(), DEFAULT_CAPACITY));
        Self {
            store,
            notifier,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create state using the capacities and costs from `config`
    pub fn from_config(store: Arc<EventStore>, config: &Config) -> Self {
        let notifier = Arc::new(NotificationSink::new(store.clone(), config.broadcast_capacity));
        Self {
            store,
            notifier,
            password_cost: config.password_cost,
        }
    }

    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}
