//! API module for HTTP and WebSocket endpoints
//!
//! REST endpoints for the event client and scraper, plus a WebSocket push
//! channel for notifications.

pub mod http;
pub mod rest;
pub mod state;
pub mod websocket;

pub use http::create_router;
pub use state::AppState;
