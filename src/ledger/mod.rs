//! Participation Ledger - joining events
//!
//! A join is one conditional store write (event exists, user not yet
//! registered, slot free) followed by a notification to the joining user.

use crate::error::LedgerError;
use crate::notify::NotificationSink;
use crate::store::EventStore;
use crate::types::Participant;

/// Register `username` on `event_name` at `joined_at` and notify them
///
/// A second join by the same user fails with [`LedgerError::AlreadyJoined`];
/// a join past the guest limit fails with [`LedgerError::EventFull`].
/// If the notification cannot be stored the join still stands.
pub fn join(
    store: &EventStore,
    notifier: &NotificationSink,
    event_name: &str,
    username: &str,
    joined_at: u64,
) -> Result<Participant, LedgerError> {
    let participant = store.append_participant(event_name, Participant::new(username, joined_at))?;
    tracing::info!(event = event_name, username, "participant joined");

    if let Err(e) = notifier.notify(username, format!("You have joined the event '{event_name}'.")) {
        tracing::error!(event = event_name, username, error = %e, "failed to record join notification");
    }

    Ok(participant)
}
