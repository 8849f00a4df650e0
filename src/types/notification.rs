//! Notification records

use serde::{Deserialize, Serialize};

/// Message addressed to a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub username: String,
    pub message: String,
    /// Unix timestamp
    pub created_at: u64,
}

impl Notification {
    pub fn new(username: impl Into<String>, message: impl Into<String>, created_at: u64) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            created_at,
        }
    }
}
