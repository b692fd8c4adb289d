//! Reporting data provider interface.
//!
//! The HTTP layer depends only on [`ReportingService`]; any backing store can
//! be plugged in by implementing it. [`sqlite`] provides the implementation
//! over [`crate::db::repository::Repository`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ReportingResult;

pub mod sqlite;

/// A recorded user event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserEvent {
    /// Event identifier
    pub id: i64,
    /// Session the event belongs to
    pub session_id: String,
    /// Event type (e.g. "page_view")
    pub event_type: String,
    /// Page the event was recorded on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    /// Arbitrary event payload
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub event_data: Option<serde_json::Value>,
    /// When the event occurred (ISO 8601)
    pub occurred_at: DateTime<Utc>,
}

/// Number of events recorded in one hour of the day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyEventCount {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Number of events
    pub count: u64,
}

/// Number of events of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeCount {
    /// Event type
    pub event_type: String,
    /// Number of events
    pub count: u64,
}

/// Query operations over recorded user events.
///
/// Implementations must be safe to call concurrently. An empty collection
/// (or a zero count) means "nothing found"; errors carry a human-readable
/// message that is returned to HTTP callers verbatim.
#[async_trait]
pub trait ReportingService: Send + Sync {
    /// Returns one page of events. `page_number` and `size` are both >= 1.
    async fn get_user_events(&self, page_number: i64, size: i64)
        -> ReportingResult<Vec<UserEvent>>;

    /// Returns every distinct session id.
    async fn get_all_session_ids(&self) -> ReportingResult<BTreeSet<String>>;

    /// Returns the events recorded for one session.
    async fn get_user_events_by_session_id(
        &self,
        session_id: &str,
    ) -> ReportingResult<Vec<UserEvent>>;

    /// Returns the total number of recorded events.
    async fn get_user_events_count(&self) -> ReportingResult<u64>;

    /// Returns event counts grouped by hour of day.
    async fn get_user_events_grouped_by_hour(&self) -> ReportingResult<Vec<HourlyEventCount>>;

    /// Returns event counts per event type.
    async fn get_event_type_distribution(&self) -> ReportingResult<Vec<EventTypeCount>>;
}
