//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{events, notifications, regions, users};
use super::state::AppState;
use super::websocket::ws_handler;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Clients and the scraper run on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        // Events
        .route("/search_events", get(events::search_events))
        .route("/search_events_by_category", get(events::search_events_by_category))
        .route("/display_events", get(events::all_events))
        .route("/all_events", get(events::all_events))
        .route("/my_events", get(events::my_events))
        .route("/join_event", post(events::join_event))
        .route("/create_event", post(events::create_event))
        .route("/import_events", post(events::import_events))
        // Reference data
        .route("/regions", get(regions::list_regions))
        // Users
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/get_user", get(users::get_user))
        .route("/update_user", patch(users::update_user))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EventStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(AppState::new(Arc::new(EventStore::in_memory())));
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }
}
