//! Event status classification
//!
//! Maps an event's free-text date and time fields plus the current instant
//! to one of four states.
//!
//! # Rule
//!
//! - `now < start` → [`EventStatus::Upcoming`]
//! - `start <= now <= end` → [`EventStatus::Ongoing`]
//! - `now > end` → [`EventStatus::Closed`]
//!
//! `start` always comes from the text before `" - "`. `end` is the range end
//! when one is given and equals `start` for a single time of day, so a
//! single-time event is only Ongoing at its exact start minute.
//! Anything that fails to parse is [`EventStatus::Unknown`].

mod schedule;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::Event;

pub use schedule::{
    parse_date, parse_schedule, parse_time_of_day, split_range, Schedule, RANGE_SEPARATOR,
};

/// Computed lifecycle state of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Closed,
    Unknown,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Closed => "Closed",
            EventStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Schedule {
    /// Status of this schedule at `now`
    pub fn status_at(&self, now: NaiveDateTime) -> EventStatus {
        if now < self.start {
            EventStatus::Upcoming
        } else if now <= self.end {
            EventStatus::Ongoing
        } else {
            EventStatus::Closed
        }
    }
}

/// Classify a date/time pair at `now`; never fails
pub fn classify(date: &str, time: &str, now: NaiveDateTime) -> EventStatus {
    match parse_schedule(date, time) {
        Ok(schedule) => schedule.status_at(now),
        Err(e) => {
            tracing::warn!(date, time, error = %e, "cannot classify event schedule");
            EventStatus::Unknown
        }
    }
}

/// Classify a stored event at `now`
pub fn classify_event(event: &Event, now: NaiveDateTime) -> EventStatus {
    match parse_schedule(&event.date, &event.time) {
        Ok(schedule) => schedule.status_at(now),
        Err(e) => {
            tracing::warn!(
                event = %event.name,
                date = %event.date,
                time = %event.time,
                error = %e,
                "cannot classify event schedule"
            );
            EventStatus::Unknown
        }
    }
}

/// Current local wall-clock time, the reference for classification
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
