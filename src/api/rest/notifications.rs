//! Notification endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use super::events::UsernameParams;
use super::{require, ApiError};
use crate::api::state::AppState;
use crate::types::Notification;

/// `{notifications: [...]}`
#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// GET /notifications - A user's notifications, newest first
///
/// A known user with nothing yet gets an empty list; 404 is reserved for
/// usernames that have neither an account nor any notifications.
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsernameParams>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let username = require(params.username.as_deref(), "username")?;
    let notifications = state.notifier.list(&username);

    if notifications.is_empty() && !state.store.user_exists(&username) {
        return Err(ApiError::not_found(format!("User '{username}' not found")));
    }

    Ok(Json(NotificationsResponse { notifications }))
}
