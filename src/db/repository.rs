//! Repository pattern for database operations.
//!
//! Read queries over the `user_events` table, one per reporting operation,
//! plus an insert used for seeding and tests.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::models::{EventTypeCountRow, HourlyCountRow, NewUserEvent, UserEventRow};
use super::db_error;
use crate::error::ReportingError;

/// Repository for database operations.
///
/// Wraps a SQLite connection pool and provides type-safe methods
/// for all database interactions.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Creates a new repository with the given connection pool.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a user event and returns its database ID.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use user_event_reporting::db::{create_pool, models::NewUserEvent, repository::Repository};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let pool = create_pool("sqlite:./user_events.db").await?;
    ///     let repo = Repository::new(pool);
    ///
    ///     repo.insert_user_event(&NewUserEvent::new("abc123", "page_view", 1706745600))
    ///         .await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn insert_user_event(&self, event: &NewUserEvent) -> Result<i64, ReportingError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_events (
                session_id, event_type, page_url, event_data, occurred_at, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.session_id)
        .bind(&event.event_type)
        .bind(&event.page_url)
        .bind(&event.event_data)
        .bind(event.occurred_at)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert user event"))?;

        Ok(result.last_insert_rowid())
    }

    /// Returns one page of events ordered by occurrence time, then id.
    ///
    /// `page_number` is 1-based. Callers validate both arguments are >= 1;
    /// the offset saturates rather than overflowing for huge page numbers.
    #[instrument(skip(self))]
    pub async fn get_user_events_page(
        &self,
        page_number: i64,
        size: i64,
    ) -> Result<Vec<UserEventRow>, ReportingError> {
        let offset = page_number.saturating_sub(1).saturating_mul(size);

        let rows = sqlx::query_as::<_, UserEventRow>(
            r#"
            SELECT id, session_id, event_type, page_url, event_data, occurred_at, created_at
            FROM user_events
            ORDER BY occurred_at ASC, id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to query user events"))?;

        debug!(count = rows.len(), offset, "Fetched user events page");

        Ok(rows)
    }

    /// Returns the distinct session ids, sorted.
    #[instrument(skip(self))]
    pub async fn get_session_ids(&self) -> Result<Vec<String>, ReportingError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT DISTINCT session_id FROM user_events ORDER BY session_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to query session ids"))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Returns all events for a session, ordered by occurrence time.
    #[instrument(skip(self))]
    pub async fn get_user_events_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<UserEventRow>, ReportingError> {
        let rows = sqlx::query_as::<_, UserEventRow>(
            r#"
            SELECT id, session_id, event_type, page_url, event_data, occurred_at, created_at
            FROM user_events
            WHERE session_id = ?
            ORDER BY occurred_at ASC, id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to query user events by session"))?;

        Ok(rows)
    }

    /// Returns the total number of stored events.
    #[instrument(skip(self))]
    pub async fn count_user_events(&self) -> Result<i64, ReportingError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_events")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count user events"))?;

        Ok(count)
    }

    /// Returns event counts grouped by UTC hour of day.
    ///
    /// Only hours with at least one event are returned, ordered by hour.
    #[instrument(skip(self))]
    pub async fn get_hourly_counts(&self) -> Result<Vec<HourlyCountRow>, ReportingError> {
        let rows = sqlx::query_as::<_, HourlyCountRow>(
            r#"
            SELECT CAST(strftime('%H', occurred_at, 'unixepoch') AS INTEGER) AS hour,
                   COUNT(*) AS count
            FROM user_events
            GROUP BY hour
            ORDER BY hour ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to query hourly counts"))?;

        Ok(rows)
    }

    /// Returns event counts per event type, most frequent first.
    #[instrument(skip(self))]
    pub async fn get_event_type_counts(&self) -> Result<Vec<EventTypeCountRow>, ReportingError> {
        let rows = sqlx::query_as::<_, EventTypeCountRow>(
            r#"
            SELECT event_type, COUNT(*) AS count
            FROM user_events
            GROUP BY event_type
            ORDER BY count DESC, event_type ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to query event type distribution"))?;

        Ok(rows)
    }

    /// Checks database connectivity.
    pub async fn health_check(&self) -> Result<(), ReportingError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("Database health check failed"))?;

        Ok(())
    }
}
