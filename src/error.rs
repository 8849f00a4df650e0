//! Error types for Event Hub
//!
//! Each component owns a small error enum; `EventHubError` aggregates them
//! for callers that cross component boundaries (startup, integration tests).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to persist store to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read store file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to turn a date/time pair into concrete instants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time '{0}', expected HH:MM or HH:MM - HH:MM")]
    InvalidTime(String),

    #[error("time field is empty")]
    MissingTime,
}

/// Errors returned by the query router
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("event store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Errors returned by the participation ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("event '{0}' not found")]
    NotFound(String),

    #[error("user '{username}' already joined '{event}'")]
    AlreadyJoined { event: String, username: String },

    #[error("event '{event}' is full ({limit} guests)")]
    EventFull { event: String, limit: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors for event creation and import
#[derive(Error, Debug)]
pub enum EventError {
    #[error("event '{0}' already exists")]
    Duplicate(String),

    #[error("invalid event: {0}")]
    Invalid(String),

    #[error("event '{event}' already has {participants} participants, more than a limit of {limit}")]
    OverCapacity {
        event: String,
        participants: usize,
        limit: u32,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors for user registration and profile operations
#[derive(Error, Debug)]
pub enum UserError {
    #[error("user '{0}' not found")]
    NotFound(String),

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid user data: {0}")]
    Invalid(String),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Configuration errors detected at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum EventHubError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("query error: {0}")]
    Query(#[from] QueryError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("event error: {0}")]
    Event(#[from] EventError),

    #[error("user error: {0}")]
    User(#[from] UserError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Event Hub operations
pub type EventHubResult<T> = Result<T, EventHubError>;
