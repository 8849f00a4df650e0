//! Event endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{blocking, require, ApiError, MessageResponse};
use crate::api::state::AppState;
use crate::catalog::{self, ImportSummary};
use crate::ledger;
use crate::query::{self, EventFilter, SearchKind, SearchRequest, ALL_QUERY};
use crate::status::local_now;
use crate::types::{Event, EventView, NewEvent};
use crate::utils::current_timestamp;

/// `{events: [...]}`
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventView>,
}

/// Query parameters for text search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free text, or "All"
    pub query: Option<String>,
    /// Optional region narrowing the search
    pub region: Option<String>,
}

/// GET /search_events - Text search, optionally within a region
///
/// A blank query is only accepted together with a region, where it means
/// "every event in the region".
pub async fn search_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<EventsResponse>, ApiError> {
    let region = params
        .region
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let request = match region {
        Some(region) => SearchRequest {
            query: params
                .query
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| ALL_QUERY.to_string()),
            kind: SearchKind::Region,
            region: Some(region),
        },
        None => SearchRequest::global(require(params.query.as_deref(), "query")?),
    };

    let events = query::search(state.store.as_ref(), &request, local_now())?;
    Ok(Json(EventsResponse { events }))
}

/// Query parameters for category search
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

/// GET /search_events_by_category - Exact category match
pub async fn search_events_by_category(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<EventsResponse>, ApiError> {
    let category = require(params.category.as_deref(), "category")?;
    let request = SearchRequest::category(category);
    let events = query::search(state.store.as_ref(), &request, local_now())?;
    Ok(Json(EventsResponse { events }))
}

/// GET /display_events, GET /all_events - Every event
pub async fn all_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EventsResponse>, ApiError> {
    let events = query::run(state.store.as_ref(), &EventFilter::All, local_now())?;
    Ok(Json(EventsResponse { events }))
}

/// Query parameters identifying a user
#[derive(Debug, Deserialize)]
pub struct UsernameParams {
    pub username: Option<String>,
}

/// GET /my_events - Events the user has joined
pub async fn my_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsernameParams>,
) -> Result<Json<EventsResponse>, ApiError> {
    let username = require(params.username.as_deref(), "username")?;
    let filter = EventFilter::Participant(username);
    let events = query::run(state.store.as_ref(), &filter, local_now())?;
    Ok(Json(EventsResponse { events }))
}

/// Body of a join request
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub username: String,
    pub event_name: String,
}

/// POST /join_event - Register a user on an event
pub async fn join_event(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let username = request.username.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }

    let event_name = request.event_name;
    let message = format!("Successfully joined event '{event_name}'");
    blocking(move || {
        ledger::join(
            &state.store,
            &state.notifier,
            &event_name,
            &username,
            current_timestamp(),
        )
    })
    .await?;

    Ok(Json(MessageResponse::new(message)))
}

/// Response to a successful creation
#[derive(Debug, Serialize)]
pub struct CreatedEvent {
    pub message: String,
    pub event: Event,
}

/// POST /create_event - Create an event hosted by `host`
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(new_event): Json<NewEvent>,
) -> Result<(StatusCode, Json<CreatedEvent>), ApiError> {
    if new_event.host.trim().is_empty() {
        return Err(ApiError::bad_request("host is required"));
    }

    let event = blocking(move || {
        catalog::create_event(&state.store, &state.notifier, new_event, current_timestamp())
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedEvent {
            message: format!("Event '{}' created", event.name),
            event,
        }),
    ))
}

/// Body of a scraper import
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub events: Vec<NewEvent>,
}

/// POST /import_events - Upsert third-party listings
pub async fn import_events(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportSummary>, ApiError> {
    let summary =
        blocking(move || catalog::import_events(&state.store, request.events, current_timestamp())).await?;
    Ok(Json(summary))
}
