//! Utility functions and helpers
//!
//! This module contains timestamp utilities.

pub mod time;

pub use time::current_timestamp;
