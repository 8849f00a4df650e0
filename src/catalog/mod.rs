//! Event creation and bulk import
//!
//! Organizers create events one at a time; the scraper pushes batches of
//! third-party listings through [`import_events`].

use serde::Serialize;

use crate::error::EventError;
use crate::notify::NotificationSink;
use crate::status::parse_schedule;
use crate::store::{EventStore, ImportOutcome};
use crate::types::{canonical_category, Event, NewEvent};

/// Host recorded on imported events that carry none
pub const IMPORT_HOST: &str = "scraper";

/// Counts returned by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Check a submitted event and build the document to store
///
/// The category is normalised to its canonical spelling.
pub fn validate(new_event: NewEvent, created_at: u64) -> Result<Event, EventError> {
    if new_event.name.trim().is_empty() {
        return Err(EventError::Invalid("event name is required".to_string()));
    }
    parse_schedule(&new_event.date, &new_event.time)?;

    let category = canonical_category(&new_event.category).ok_or_else(|| {
        EventError::Invalid(format!("unknown event type '{}'", new_event.category))
    })?;

    if let Some(0) = new_event.guest_limit {
        return Err(EventError::Invalid("guest limit must be at least 1".to_string()));
    }

    let mut event = new_event.into_event(created_at);
    event.category = category.to_string();
    Ok(event)
}

/// Create an event and notify its host
pub fn create_event(
    store: &EventStore,
    notifier: &NotificationSink,
    new_event: NewEvent,
    created_at: u64,
) -> Result<Event, EventError> {
    let event = store.insert_event(validate(new_event, created_at)?)?;
    tracing::info!(event = %event.name, host = %event.host, "event created");

    if !event.host.is_empty() {
        let message = format!("Your event '{}' has been created.", event.name);
        if let Err(e) = notifier.notify(&event.host, message) {
            tracing::error!(event = %event.name, error = %e, "failed to record creation notification");
        }
    }

    Ok(event)
}

/// Upsert a batch of listings keyed by name
///
/// Invalid listings, and listings whose guest limit is below the number of
/// people already registered, are skipped and counted. A store failure
/// aborts the batch; listings before it stay applied.
pub fn import_events(
    store: &EventStore,
    listings: Vec<NewEvent>,
    imported_at: u64,
) -> Result<ImportSummary, EventError> {
    let mut summary = ImportSummary::default();

    for mut listing in listings {
        if listing.host.trim().is_empty() {
            listing.host = IMPORT_HOST.to_string();
        }
        let name = listing.name.clone();

        let event = match validate(listing, imported_at) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(event = %name, error = %e, "skipping invalid listing");
                summary.skipped += 1;
                continue;
            }
        };

        match store.upsert_event(event) {
            Ok(ImportOutcome::Inserted) => summary.imported += 1,
            Ok(ImportOutcome::Updated) => summary.updated += 1,
            Err(e @ EventError::OverCapacity { .. }) => {
                tracing::warn!(event = %name, error = %e, "skipping listing that would overfill event");
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        imported = summary.imported,
        updated = summary.updated,
        skipped = summary.skipped,
        "listings imported"
    );
    Ok(summary)
}
