//! Event Hub
//!
//! An event discovery and registration server: users search and join
//! community events, organizers create them, and a scraper imports
//! third-party listings over HTTP/JSON.
//!
//! # Modules
//!
//! - `types`: Documents (Event, User, Notification, Region) and views
//! - `status`: Upcoming/Ongoing/Closed/Unknown classification from free-text
//!   date and time fields
//! - `query`: Search routing and store filters
//! - `store`: Thread-safe document store with JSONL persistence
//! - `ledger`: Atomic event joins
//! - `notify`: Notification log with broadcast fan-out
//! - `catalog`: Event creation and scraper import
//! - `accounts`: Registration, login and profiles
//! - `api`: Axum HTTP and WebSocket endpoints
//! - `config`: Command-line and environment configuration
//! - `server`: Startup and run loop
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use event_hub::{create_router, AppState, EventStore};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = Arc::new(EventStore::in_memory());
//!     let app = create_router(Arc::new(AppState::new(store)));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3030").await?;
//!     axum::serve(listener, app).await
//! }
//! ```

pub mod accounts;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod query;
pub mod server;
pub mod status;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::{Args, Config};
pub use error::{EventHubError, EventHubResult};
pub use notify::NotificationSink;
pub use query::{search, EventFilter, EventSource, SearchKind, SearchRequest};
pub use status::{classify, classify_event, EventStatus};
pub use store::EventStore;
pub use types::{Event, EventView, NewEvent, Notification, Participant, Region, User};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
