//! Event collection operations

use std::sync::Arc;

use rayon::prelude::*;

use super::EventStore;
use crate::error::{EventError, LedgerError, StoreError};
use crate::query::{EventFilter, EventSource};
use crate::types::{Event, Participant};

/// Threshold for using parallel filtering (events count)
const PARALLEL_FILTER_THRESHOLD: usize = 1000;

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted,
    Updated,
}

impl EventStore {
    /// Look up an event by exact name
    pub fn get_event(&self, name: &str) -> Option<Event> {
        self.read(|data| data.events.iter().find(|e| e.name == name).cloned())
    }

    /// Every event in insertion order
    pub fn all_events(&self) -> Vec<Event> {
        self.read(|data| data.events.to_vec())
    }

    pub fn event_count(&self) -> usize {
        self.read(|data| data.events.len())
    }

    /// Insert a new event; names are unique
    pub fn insert_event(&self, event: Event) -> Result<Event, EventError> {
        self.mutate(|data| {
            if data.events.iter().any(|e| e.name == event.name) {
                return Err(EventError::Duplicate(event.name.clone()));
            }
            Arc::make_mut(&mut data.events).push(event.clone());
            Ok(event)
        })
    }

    /// Insert or replace the descriptive fields of an event keyed by name
    ///
    /// Participants, host and creation time of an existing event are kept. A
    /// guest limit below the current participant count is rejected with
    /// [`EventError::OverCapacity`] and leaves the event untouched.
    pub fn upsert_event(&self, event: Event) -> Result<ImportOutcome, EventError> {
        self.mutate(|data| {
            let events = Arc::make_mut(&mut data.events);
            match events.iter_mut().find(|e| e.name == event.name) {
                Some(existing) => {
                    let participants = existing.participants.len();
                    if let Some(limit) = event.guest_limit.filter(|&l| participants > l as usize) {
                        return Err(EventError::OverCapacity {
                            event: event.name,
                            participants,
                            limit,
                        });
                    }
                    existing.date = event.date;
                    existing.time = event.time;
                    existing.location = event.location;
                    existing.category = event.category;
                    existing.description = event.description;
                    existing.ticket_limit = event.ticket_limit;
                    existing.guest_limit = event.guest_limit;
                    if existing.host.is_empty() {
                        existing.host = event.host;
                    }
                    Ok(ImportOutcome::Updated)
                }
                None => {
                    events.push(event);
                    Ok(ImportOutcome::Inserted)
                }
            }
        })
    }

    /// Append `participant` to `event_name` if they are new and a slot is free
    ///
    /// The existence check, duplicate check, limit check and append happen
    /// under one write lock.
    pub fn append_participant(
        &self,
        event_name: &str,
        participant: Participant,
    ) -> Result<Participant, LedgerError> {
        self.mutate(|data| {
            let event = Arc::make_mut(&mut data.events)
                .iter_mut()
                .find(|e| e.name == event_name)
                .ok_or_else(|| LedgerError::NotFound(event_name.to_string()))?;

            if event.has_participant(&participant.username) {
                return Err(LedgerError::AlreadyJoined {
                    event: event.name.clone(),
                    username: participant.username.clone(),
                });
            }
            if let (Some(limit), true) = (event.guest_limit, event.is_full()) {
                return Err(LedgerError::EventFull {
                    event: event.name.clone(),
                    limit,
                });
            }

            event.participants.push(participant.clone());
            Ok(participant)
        })
    }
}

impl EventSource for EventStore {
    fn find_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        Ok(self.read(|data| {
            if data.events.len() > PARALLEL_FILTER_THRESHOLD {
                data.events
                    .par_iter()
                    .filter(|e| filter.matches(e))
                    .cloned()
                    .collect()
            } else {
                data.events
                    .iter()
                    .filter(|e| filter.matches(e))
                    .cloned()
                    .collect()
            }
        }))
    }
}
