//! Event records and their API views

use serde::{Deserialize, Serialize};

use super::is_zero;
use crate::status::EventStatus;

/// A user's registration on an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub username: String,
    /// Unix timestamp of the join
    #[serde(default)]
    pub joined_at: u64,
}

impl Participant {
    pub fn new(username: impl Into<String>, joined_at: u64) -> Self {
        Self {
            username: username.into(),
            joined_at,
        }
    }
}

/// Event document as held by the store
///
/// `name` is the identity: lookups use exact, case-sensitive matching.
/// `date` and `time` stay free text; the status classifier interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_limit: Option<u32>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub host: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub created_at: u64,
}

impl Event {
    /// Create an event with no limits, participants or host
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
            location: String::new(),
            category: category.into(),
            description: String::new(),
            ticket_limit: None,
            guest_limit: None,
            participants: Vec::new(),
            host: String::new(),
            created_at: 0,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_guest_limit(mut self, limit: u32) -> Self {
        self.guest_limit = Some(limit);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Whether `username` is already registered
    pub fn has_participant(&self, username: &str) -> bool {
        self.participants.iter().any(|p| p.username == username)
    }

    /// Remaining guest slots, `None` when the event has no guest limit
    pub fn available_slots(&self) -> Option<u32> {
        self.guest_limit.map(|limit| {
            let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
            limit.saturating_sub(taken)
        })
    }

    /// True when a guest limit exists and every slot is taken
    pub fn is_full(&self) -> bool {
        self.available_slots() == Some(0)
    }
}

/// Input for creating or importing an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ticket_limit: Option<u32>,
    #[serde(default)]
    pub guest_limit: Option<u32>,
    #[serde(default)]
    pub host: String,
}

impl NewEvent {
    /// Build the stored document; participants start empty
    pub fn into_event(self, created_at: u64) -> Event {
        Event {
            name: self.name.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location,
            category: self.category,
            description: self.description,
            ticket_limit: self.ticket_limit,
            guest_limit: self.guest_limit,
            participants: Vec::new(),
            host: self.host,
            created_at,
        }
    }
}

impl From<Event> for NewEvent {
    fn from(event: Event) -> Self {
        Self {
            name: event.name,
            date: event.date,
            time: event.time,
            location: event.location,
            category: event.category,
            description: event.description,
            ticket_limit: event.ticket_limit,
            guest_limit: event.guest_limit,
            host: event.host,
        }
    }
}

/// Event annotated with its computed status, as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_slots: Option<u32>,
}

impl EventView {
    pub fn new(event: Event, status: EventStatus) -> Self {
        let available_slots = event.available_slots();
        Self {
            event,
            status,
            available_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_slots() {
        let mut event = Event::new("Beach Cleanup", "2026-05-01", "08:00", "Community");
        assert_eq!(event.available_slots(), None);
        assert!(!event.is_full());

        event.guest_limit = Some(2);
        event.participants.push(Participant::new("alice", 1));
        assert_eq!(event.available_slots(), Some(1));

        event.participants.push(Participant::new("bob", 2));
        assert!(event.is_full());
    }

    #[test]
    fn test_event_json_uses_type_key() {
        let event = Event::new("Jazz Night", "2026-05-01", "19:00 - 22:00", "Music");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Music");
        assert!(json.get("guest_limit").is_none());

        let parsed: Event = serde_json::from_str(
            r#"{"name":"X","date":"2026-01-01","time":"10:00","type":"Arts"}"#,
        )
        .unwrap();
        assert_eq!(parsed.category, "Arts");
        assert!(parsed.participants.is_empty());
    }

    #[test]
    fn test_event_view_flattens_event() {
        let event = Event::new("Jazz Night", "2026-05-01", "19:00", "Music").with_guest_limit(10);
        let view = EventView::new(event, EventStatus::Upcoming);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Jazz Night");
        assert_eq!(json["status"], "Upcoming");
        assert_eq!(json["available_slots"], 10);
    }
}
