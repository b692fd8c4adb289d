//! Database module for reading recorded user events.
//!
//! This module provides SQLite-based access to the `user_events` table.
//!
//! # Architecture
//!
//! - `models`: Data structures that map to database rows
//! - `repository`: Read queries plus a single insert used for seeding
//! - Connection pooling with SQLite WAL mode for concurrent readers
//! - Embedded migrations so a fresh database has the expected schema

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::ReportingError;

pub mod models;
pub mod repository;

/// Wraps a sqlx error, keeping its text in the message so callers see the
/// underlying cause (e.g. `no such table: user_events`).
pub(crate) fn db_error<E>(context: &'static str) -> impl FnOnce(E) -> ReportingError
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |e| ReportingError::database(format!("{context}: {e}"), Some(Box::new(e)))
}

/// Creates a SQLite connection pool with optimized settings.
///
/// # Configuration
///
/// - **WAL mode**: Enables concurrent readers during writes
/// - **Busy timeout**: 30 seconds to handle lock contention
/// - **Max connections**: 5, or a single long-lived connection for
///   `:memory:` databases (each connection would otherwise see its own
///   empty database)
///
/// # Example
///
/// ```no_run
/// use user_event_reporting::db::create_pool;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool("sqlite:./user_events.db").await?;
///     Ok(())
/// }
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, ReportingError> {
    info!(database_url, "Connecting to database");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            ReportingError::database(
                format!("Failed to parse database URL: {database_url}"),
                Some(Box::new(e)),
            )
        })?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(30));

    let in_memory = database_url.contains(":memory:");
    let mut pool_options = SqlitePoolOptions::new()
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5));

    pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(5)
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        ReportingError::database(
            format!("Failed to connect to database at {database_url}"),
            Some(Box::new(e)),
        )
    })?;

    info!("Running database migrations");
    run_migrations(&pool).await?;
    verify_database(&pool).await?;
    info!("Database migrations complete");

    Ok(pool)
}

/// Runs embedded migrations from the `migrations/` directory.
///
/// Migrations are idempotent and safe to run on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), ReportingError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(db_error("Failed to run database migrations"))?;

    Ok(())
}

/// Verify that the `user_events` table exists after migrations.
pub async fn verify_database(pool: &SqlitePool) -> Result<(), ReportingError> {
    let rows = sqlx::query_as::<_, (String,)>(
        r#"
        SELECT name FROM sqlite_master
        WHERE type='table' AND name = 'user_events'
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error("Failed to verify database schema"))?;

    if rows.is_empty() {
        return Err(ReportingError::database(
            "Database schema incomplete: user_events table is missing",
            None,
        ));
    }

    Ok(())
}
