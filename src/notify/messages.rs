//! Frames exchanged on the push channel

use serde::{Deserialize, Serialize};

use crate::types::Notification;

/// A recorded notification as pushed to listeners
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(flatten)]
    pub notification: Notification,

    /// Increases by one per notification; a jump means frames were missed
    pub sequence_id: u64,
}

impl PushMessage {
    pub fn new(notification: Notification, sequence_id: u64) -> Self {
        Self {
            kind: "notification".to_string(),
            notification,
            sequence_id,
        }
    }

    /// Whether a listener filtering on `username` should receive this
    pub fn is_for(&self, username: Option<&str>) -> bool {
        username.map_or(true, |u| self.notification.username == u)
    }
}

/// Frames a client may send
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping,
}

/// First frame on every connection
#[derive(Clone, Debug, Serialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub current_sequence_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl WelcomeMessage {
    pub fn new(current_sequence_id: u64, username: Option<String>) -> Self {
        Self {
            kind: "connected",
            current_sequence_id,
            username,
        }
    }
}

/// Sent when a listener fell behind the channel buffer
#[derive(Clone, Debug, Serialize)]
pub struct LaggedMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: &'static str,
    pub missed: u64,
    pub message: String,
}

impl LaggedMessage {
    pub fn new(missed: u64) -> Self {
        Self {
            kind: "error",
            code: "lagged",
            missed,
            message: format!("Missed {missed} notifications, reload them from /notifications"),
        }
    }
}

/// Reply to a client ping
#[derive(Clone, Debug, Serialize)]
pub struct PongMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl Default for PongMessage {
    fn default() -> Self {
        Self { kind: "pong" }
    }
}
