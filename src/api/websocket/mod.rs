//! WebSocket push channel for notifications
//!
//! `GET /ws` streams notifications as they are recorded. With
//! `?username=` only that user's notifications are forwarded.

pub mod handler;

pub use handler::ws_handler;
