//! Event Record Store - document collections behind one lock
//!
//! Holds events, users, notifications and regions in memory and persists
//! every mutation to a JSONL file. Writes go through
//! [`EventStore::mutate`], which keeps the write lock across the
//! check-then-write sequence and the disk flush, so conditional updates such
//! as "append a participant if a slot is free" are atomic. Plain appends to
//! the notification log use `mutate_with_undo` and skip the snapshot.

mod events;
mod notifications;
mod persist;
mod regions;
mod users;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::types::{Event, Notification, Region, User};

pub use events::ImportOutcome;
pub use regions::SeedReport;

/// Raw collections
///
/// Each collection is shared copy-on-write: cloning `StoreData` is four
/// reference-count bumps, and a write copies only the collection it touches
/// while a clone is alive.
#[derive(Debug, Clone, Default)]
pub struct StoreData {
    pub events: Arc<Vec<Event>>,
    pub users: Arc<Vec<User>>,
    pub notifications: Arc<Vec<Notification>>,
    pub regions: Arc<Vec<Region>>,
}

/// Thread-safe document store
pub struct EventStore {
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) data: RwLock<StoreData>,
}

impl EventStore {
    /// Store that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            file_path: None,
            data: RwLock::new(StoreData::default()),
        }
    }

    /// Open (or create) a store backed by `file_path`
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file_path = file_path.into();

        if let Ok(true) = persist::cleanup_temp_file(&file_path) {
            tracing::warn!(path = %file_path.display(), "removed leftover temp file from interrupted write");
        }

        let data = persist::load(&file_path)?;
        tracing::info!(
            path = %file_path.display(),
            events = data.events.len(),
            users = data.users.len(),
            notifications = data.notifications.len(),
            regions = data.regions.len(),
            "store loaded"
        );

        Ok(Self {
            file_path: Some(file_path),
            data: RwLock::new(data),
        })
    }

    /// Backing file, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Run `f` against a read-locked view of the collections
    pub(crate) fn read<T>(&self, f: impl FnOnce(&StoreData) -> T) -> T {
        let data = self.data.read();
        f(&*data)
    }

    /// Apply `f` under the write lock and persist the result
    ///
    /// If `f` fails nothing is written. If persisting fails the in-memory
    /// collections are rolled back so memory and disk never diverge.
    pub(crate) fn mutate<T, E>(&self, f: impl FnOnce(&mut StoreData) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut data = self.data.write();
        let Some(path) = self.file_path.as_deref() else {
            return f(&mut *data);
        };

        let snapshot = (*data).clone();
        let value = f(&mut *data)?;
        if let Err(e) = persist::persist(path, &data) {
            tracing::error!(error = %e, "store persist failed, rolling back");
            *data = snapshot;
            return Err(e.into());
        }
        Ok(value)
    }

    /// Apply `apply` under the write lock and persist, calling `undo` if the
    /// flush fails
    ///
    /// For appends to a large collection, where reverting is cheaper than a
    /// snapshot that would force a copy.
    pub(crate) fn mutate_with_undo<T>(
        &self,
        apply: impl FnOnce(&mut StoreData) -> T,
        undo: impl FnOnce(&mut StoreData),
    ) -> Result<T, StoreError> {
        let mut data = self.data.write();
        let value = apply(&mut *data);

        if let Some(path) = self.file_path.as_deref() {
            if let Err(e) = persist::persist(path, &data) {
                tracing::error!(error = %e, "store persist failed, undoing append");
                undo(&mut *data);
                return Err(e);
            }
        }
        Ok(value)
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
