//! Query Router - turns search requests into annotated event lists
//!
//! A request is routed to an [`EventFilter`], the filter runs against an
//! [`EventSource`], and every match is annotated with its computed status.
//! A failing source is reported as [`QueryError::StoreUnavailable`]; an empty
//! `Ok` always means "no matches".

mod filter;
mod router;

use chrono::NaiveDateTime;

use crate::error::{QueryError, StoreError};
use crate::status::classify_event;
use crate::types::{Event, EventView};

pub use filter::{contains_ignore_case, EventFilter};
pub use router::{route, SearchKind, SearchRequest, ALL_QUERY};

/// Anything that can answer a filtered event read
pub trait EventSource: Send + Sync {
    fn find_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError>;
}

/// Route `request`, run it, and annotate the matches at `now`
pub fn search(
    source: &dyn EventSource,
    request: &SearchRequest,
    now: NaiveDateTime,
) -> Result<Vec<EventView>, QueryError> {
    run(source, &route(request), now)
}

/// Run an already-built filter and annotate the matches at `now`
pub fn run(
    source: &dyn EventSource,
    filter: &EventFilter,
    now: NaiveDateTime,
) -> Result<Vec<EventView>, QueryError> {
    let events = source.find_events(filter).map_err(|e| {
        tracing::error!(error = %e, filter = ?filter, "event store read failed");
        QueryError::StoreUnavailable(e)
    })?;

    Ok(events
        .into_iter()
        .map(|event| {
            let status = classify_event(&event, now);
            EventView::new(event, status)
        })
        .collect())
}
