//! # User Event Reporting
//!
//! Read-only HTTP reporting over recorded user events: paging, per-session
//! lookups, counts, hourly grouping and event-type distribution.
//!
//! ## Architecture
//!
//! 1. **API Layer** ([`api`]) - Axum routes, validation and status mapping
//! 2. **Provider Interface** ([`reporting`]) - The [`reporting::ReportingService`] trait
//! 3. **Database Layer** ([`db`]) - SQLite pool, migrations and queries
//! 4. **Ambient** - [`config`], [`error`], [`observability`], [`cli`]
//!
//! The API layer only knows the provider trait. Any error the provider
//! reports becomes a 400 whose body is the error text, and empty results
//! become 404s.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --release -- serve --port 8080
//! curl 'http://localhost:8080/getUserEvents?pageNumber=1&size=20'
//! ```
//!
//! ### Using as a Library
//!
//! ```rust,no_run
//! use user_event_reporting::{
//!     api::server::build_app, app_state::AppState, db, db::repository::Repository,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("sqlite:./user_events.db").await?;
//!     let app = build_app(AppState::new(Repository::new(pool)), &[]);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! # All tests
//! cargo test
//!
//! # Integration tests
//! cargo test --test '*'
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod reporting;
