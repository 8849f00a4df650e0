//! Store filters

use crate::types::Event;

/// Predicate applied to stored events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// Every event
    All,
    /// Case-insensitive exact match on the category
    Category(String),
    /// Case-insensitive substring on name or description, optionally also
    /// requiring a substring match on location
    Text {
        needle: String,
        region: Option<String>,
    },
    /// Case-insensitive substring on location only
    Region(String),
    /// Events `username` has joined
    Participant(String),
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Category(category) => {
                event.category.trim().eq_ignore_ascii_case(category.trim())
            }
            EventFilter::Text { needle, region } => {
                let text_hit = contains_ignore_case(&event.name, needle)
                    || contains_ignore_case(&event.description, needle);
                text_hit
                    && region
                        .as_deref()
                        .map_or(true, |region| contains_ignore_case(&event.location, region))
            }
            EventFilter::Region(region) => contains_ignore_case(&event.location, region),
            EventFilter::Participant(username) => event.has_participant(username),
        }
    }
}

/// Unicode-aware case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
