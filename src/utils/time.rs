//! Time and timestamp utilities

use chrono::Utc;

/// Get current Unix timestamp in seconds
pub fn current_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}
