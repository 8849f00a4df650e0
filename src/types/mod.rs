//! Data types for Event Hub
//!
//! This module contains the documents held by the store and the views
//! returned to clients.

mod category;
mod event;
mod notification;
mod region;
mod user;

pub use category::{canonical_category, CATEGORIES};
pub use event::{Event, EventView, NewEvent, Participant};
pub use notification::Notification;
pub use region::{default_regions, slugify, Region, DEFAULT_REGIONS};
pub use user::{ProfileUpdate, User, UserProfile, INCOMPLETE};

/// Check if value is zero (for skip_serializing_if)
pub fn is_zero(val: &u64) -> bool {
    *val == 0
}
