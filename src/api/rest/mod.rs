//! REST API module for HTTP endpoints
//!
//! - `events`: search, listing, join, create, import
//! - `users`: register, login, profile read and update
//! - `notifications`: per-user notification log
//! - `regions`: region vocabulary

pub mod events;
pub mod notifications;
pub mod regions;
pub mod users;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{EventError, LedgerError, QueryError, StoreError, UserError};

/// Run store writes and password hashing on the blocking pool
///
/// Every store write rewrites and syncs the data file, which must not stall
/// the async workers.
pub(crate) async fn blocking<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("worker failed: {e}")))?
        .map_err(Into::into)
}

/// Body of a plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
            code: code.to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::store_unavailable(e.to_string())
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::StoreUnavailable(e) => e.into(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::NotFound(_) => ApiError::not_found(e.to_string()),
            LedgerError::AlreadyJoined { .. } | LedgerError::EventFull { .. } => {
                ApiError::conflict(e.to_string())
            }
            LedgerError::Store(e) => e.into(),
        }
    }
}

impl From<EventError> for ApiError {
    fn from(e: EventError) -> Self {
        match e {
            EventError::Duplicate(_) | EventError::OverCapacity { .. } => {
                ApiError::conflict(e.to_string())
            }
            EventError::Invalid(_) | EventError::Schedule(_) => ApiError::bad_request(e.to_string()),
            EventError::Store(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => ApiError::not_found(e.to_string()),
            UserError::UsernameTaken(_) | UserError::EmailTaken(_) => {
                ApiError::conflict(e.to_string())
            }
            UserError::InvalidCredentials => ApiError::unauthorized(e.to_string()),
            UserError::Invalid(_) => ApiError::bad_request(e.to_string()),
            UserError::Hash(_) => ApiError::internal(e.to_string()),
            UserError::Store(e) => e.into(),
        }
    }
}

/// Reject blank required query parameters
pub(crate) fn require(value: Option<&str>, name: &str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request(format!("Query parameter '{name}' is required")))
}
