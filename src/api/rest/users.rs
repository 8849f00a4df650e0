//! User endpoints
//!
//! Password hashing and profile writes run on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::events::UsernameParams;
use super::{blocking, require, ApiError};
use crate::accounts::{self, Registration};
use crate::api::state::AppState;
use crate::types::{ProfileUpdate, UserProfile};
use crate::utils::current_timestamp;

/// Profile plus a human-readable message
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserProfile,
}

/// POST /register - Create an account
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let store = state.store.clone();
    let notifier = state.notifier.clone();
    let cost = state.password_cost;

    let user = blocking(move || {
        accounts::register(&store, &notifier, registration, cost, current_timestamp())
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: Some("User registered successfully".to_string()),
            user,
        }),
    ))
}

/// Body of a login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login - Verify credentials
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let store = state.store.clone();
    let user = blocking(move || accounts::login(&store, &request.username, &request.password)).await?;

    Ok(Json(UserResponse {
        message: Some("Login successful".to_string()),
        user,
    }))
}

/// GET /get_user - Read a profile
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsernameParams>,
) -> Result<Json<UserResponse>, ApiError> {
    let username = require(params.username.as_deref(), "username")?;
    let user = accounts::get_profile(&state.store, &username)?;
    Ok(Json(UserResponse { message: None, user }))
}

/// Body of a profile update
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    #[serde(flatten)]
    pub update: ProfileUpdate,
}

/// PATCH /update_user - Partial profile update
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let store = state.store.clone();
    let user = blocking(move || accounts::update_profile(&store, &request.username, request.update)).await?;
    Ok(Json(UserResponse {
        message: Some("Profile updated successfully".to_string()),
        user,
    }))
}
