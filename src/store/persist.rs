//! JSONL persistence for the store
//!
//! Each line is one tagged document. Writes go through a temp file that is
//! synced and then renamed over the target, so the file on disk is always
//! either the previous or the new version.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::StoreData;
use crate::error::StoreError;
use crate::types::{Event, Notification, Region, User};

/// One persisted line
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Document {
    Event(Event),
    User(User),
    Notification(Notification),
    Region(Region),
}

/// Load every document from `path`; a missing file is an empty store
pub(crate) fn load(path: &Path) -> Result<StoreData, StoreError> {
    if !path.exists() {
        return Ok(StoreData::default());
    }

    let content = fs::read_to_string(path).map_err(|source| StoreError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let (mut events, mut users, mut notifications, mut regions) =
        (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Document>(line) {
            Ok(Document::Event(event)) => events.push(event),
            Ok(Document::User(user)) => users.push(user),
            Ok(Document::Notification(n)) => notifications.push(n),
            Ok(Document::Region(region)) => regions.push(region),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "skipping unreadable store line"
                );
            }
        }
    }

    Ok(StoreData {
        events: Arc::new(events),
        users: Arc::new(users),
        notifications: Arc::new(notifications),
        regions: Arc::new(regions),
    })
}

/// Rewrite `path` with the full contents of `data`
pub(crate) fn persist(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    atomic_write_with(path, |file| {
        let mut writer = BufWriter::new(file);
        for event in data.events.iter() {
            write_line(&mut writer, &DocumentRef::Event(event))?;
        }
        for user in data.users.iter() {
            write_line(&mut writer, &DocumentRef::User(user))?;
        }
        for notification in data.notifications.iter() {
            write_line(&mut writer, &DocumentRef::Notification(notification))?;
        }
        for region in data.regions.iter() {
            write_line(&mut writer, &DocumentRef::Region(region))?;
        }
        writer.flush()
    })
    .map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

/// Borrowed twin of [`Document`] so persisting does not clone the store
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum DocumentRef<'a> {
    Event(&'a Event),
    User(&'a User),
    Notification(&'a Notification),
    Region(&'a Region),
}

fn write_line<W: Write>(writer: &mut W, doc: &DocumentRef<'_>) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, doc)?;
    writer.write_all(b"\n")
}

/// Atomically write a file using a writer function
///
/// 1. Write to `<path>.tmp`
/// 2. `sync_all()` to flush to disk
/// 3. Rename over `path`
fn atomic_write_with<F>(path: &Path, write_fn: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    write_fn(&mut file)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)
}

/// Remove a temp file left behind by an interrupted write
pub(crate) fn cleanup_temp_file(path: &Path) -> io::Result<bool> {
    let temp_path = path.with_extension("tmp");
    if temp_path.exists() {
        fs::remove_file(&temp_path)?;
        return Ok(true);
    }
    Ok(false)
}
