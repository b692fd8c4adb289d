//! Database models that map to SQL rows.
//!
//! Timestamps are stored as unix seconds and `event_data` as JSON text;
//! conversion into reporting results happens in [`crate::reporting::sqlite`].

/// A stored user event.
///
/// Maps to the `user_events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserEventRow {
    /// Database-assigned unique identifier
    pub id: i64,
    /// Session the event belongs to
    pub session_id: String,
    /// Event type (e.g. "page_view", "click")
    pub event_type: String,
    /// Page the event was recorded on
    pub page_url: Option<String>,
    /// Raw JSON payload
    pub event_data: Option<String>,
    /// Unix timestamp when the event occurred
    pub occurred_at: i64,
    /// Unix timestamp when the row was written
    pub created_at: i64,
}

/// A user event to be inserted.
#[derive(Debug, Clone)]
pub struct NewUserEvent {
    /// Session the event belongs to
    pub session_id: String,
    /// Event type
    pub event_type: String,
    /// Page the event was recorded on
    pub page_url: Option<String>,
    /// Raw JSON payload
    pub event_data: Option<String>,
    /// Unix timestamp when the event occurred
    pub occurred_at: i64,
}

impl NewUserEvent {
    /// Creates an event with no page URL or payload.
    pub fn new(
        session_id: impl Into<String>,
        event_type: impl Into<String>,
        occurred_at: i64,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            event_type: event_type.into(),
            page_url: None,
            event_data: None,
            occurred_at,
        }
    }

    /// Sets the page URL.
    #[must_use]
    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = Some(page_url.into());
        self
    }

    /// Sets the raw JSON payload.
    #[must_use]
    pub fn with_event_data(mut self, event_data: impl Into<String>) -> Self {
        self.event_data = Some(event_data.into());
        self
    }
}

/// Event count for one hour of the day.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HourlyCountRow {
    /// Hour of day (0-23, UTC)
    pub hour: i64,
    /// Number of events in that hour
    pub count: i64,
}

/// Event count for one event type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventTypeCountRow {
    /// Event type
    pub event_type: String,
    /// Number of events of that type
    pub count: i64,
}
