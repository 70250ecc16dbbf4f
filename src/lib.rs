//! # pagetrack
//!
//! A minimal web analytics demo built with [`axum`](https://crates.io/crates/axum),
//! [`tower-sessions`](https://crates.io/crates/tower-sessions) and
//! [Sea-ORM](https://crates.io/crates/sea-orm).
//!
//! The service serves a handful of static pages and records, per visitor
//! session, two things:
//!
//! - the number of seconds spent on the previously viewed page, written to
//!   the `PageView` table whenever the visitor crosses a tracked page
//!   boundary, and
//! - whether the "Contact" button was clicked, written to the `Button` table.
//!
//! All state lives in the server-side session: a random visitor id, the
//! timestamp of entry to the current page and the label of that page. The
//! [`tracker`] module turns those three values into append-only database rows
//! as the visitor moves between `/`, `/learn_more` and `/confirmation`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagetrack::app::{router, AppState};
//! use sea_orm::Database;
//! use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect to the (pre-provisioned) database
//! let db = Database::connect("sqlite://test.db?mode=rwc").await?;
//!
//! // Sessions are held in memory and expire with the browser session
//! let session_layer = SessionManagerLayer::new(MemoryStore::default())
//!     .with_secure(false)
//!     .with_expiry(Expiry::OnSessionEnd);
//!
//! let app = router(AppState { db }).layer(session_layer);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app.into_make_service()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Database Schema
//!
//! The tracker writes to two append-only tables which must exist before the
//! server takes traffic (the optional `migration` feature can create them):
//!
//! | Table      | Columns                                              |
//! |------------|------------------------------------------------------|
//! | `PageView` | `session_id`, `page`, `time_spent`, `start_time`     |
//! | `Button`   | `session_id`, `button`                               |

pub mod app;
pub mod entity;
pub mod error;
pub mod tracker;

#[cfg(feature = "migration")]
pub mod migration;

/// Shared application state handed to every request handler.
pub use app::AppState;

/// Error type for session and database faults; renders as a bare 500.
pub use error::AppError;
