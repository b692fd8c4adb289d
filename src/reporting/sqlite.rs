//! [`ReportingService`] backed by the SQLite repository.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::DateTime;

use super::{EventTypeCount, HourlyEventCount, ReportingService, UserEvent};
use crate::db::models::{EventTypeCountRow, HourlyCountRow, UserEventRow};
use crate::db::repository::Repository;
use crate::error::{ReportingError, ReportingResult};

impl TryFrom<UserEventRow> for UserEvent {
    type Error = ReportingError;

    fn try_from(row: UserEventRow) -> Result<Self, Self::Error> {
        let occurred_at = DateTime::from_timestamp(row.occurred_at, 0).ok_or_else(|| {
            ReportingError::decoding(
                format!(
                    "Event {} has an out of range timestamp: {}",
                    row.id, row.occurred_at
                ),
                None,
            )
        })?;

        let event_data: Option<serde_json::Value> = row
            .event_data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| {
                ReportingError::decoding(
                    format!("Event {} has invalid event_data JSON", row.id),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            event_type: row.event_type,
            page_url: row.page_url,
            event_data,
            occurred_at,
        })
    }
}

impl TryFrom<HourlyCountRow> for HourlyEventCount {
    type Error = ReportingError;

    fn try_from(row: HourlyCountRow) -> Result<Self, Self::Error> {
        let hour = u8::try_from(row.hour)
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| {
                ReportingError::decoding(format!("Invalid hour of day: {}", row.hour), None)
            })?;

        Ok(Self {
            hour,
            count: non_negative(row.count)?,
        })
    }
}

impl TryFrom<EventTypeCountRow> for EventTypeCount {
    type Error = ReportingError;

    fn try_from(row: EventTypeCountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            event_type: row.event_type,
            count: non_negative(row.count)?,
        })
    }
}

fn non_negative(count: i64) -> ReportingResult<u64> {
    u64::try_from(count).map_err(|e| {
        ReportingError::decoding(format!("Negative count: {count}"), Some(Box::new(e)))
    })
}

fn convert_all<R, T>(rows: Vec<R>) -> ReportingResult<Vec<T>>
where
    T: TryFrom<R, Error = ReportingError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl ReportingService for Repository {
    async fn get_user_events(
        &self,
        page_number: i64,
        size: i64,
    ) -> ReportingResult<Vec<UserEvent>> {
        convert_all(self.get_user_events_page(page_number, size).await?)
    }

    async fn get_all_session_ids(&self) -> ReportingResult<BTreeSet<String>> {
        Ok(self.get_session_ids().await?.into_iter().collect())
    }

    async fn get_user_events_by_session_id(
        &self,
        session_id: &str,
    ) -> ReportingResult<Vec<UserEvent>> {
        convert_all(self.get_user_events_by_session(session_id).await?)
    }

    async fn get_user_events_count(&self) -> ReportingResult<u64> {
        non_negative(self.count_user_events().await?)
    }

    async fn get_user_events_grouped_by_hour(&self) -> ReportingResult<Vec<HourlyEventCount>> {
        convert_all(self.get_hourly_counts().await?)
    }

    async fn get_event_type_distribution(&self) -> ReportingResult<Vec<EventTypeCount>> {
        convert_all(self.get_event_type_counts().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, models::NewUserEvent};

    const BASE_TS: i64 = 1_706_745_600;

    fn row(event_data: Option<&str>, occurred_at: i64) -> UserEventRow {
        UserEventRow {
            id: 7,
            session_id: "abc123".to_string(),
            event_type: "click".to_string(),
            page_url: Some("/home".to_string()),
            event_data: event_data.map(ToString::to_string),
            occurred_at,
            created_at: occurred_at,
        }
    }

    #[test]
    fn test_user_event_conversion() {
        let event = UserEvent::try_from(row(Some(r#"{"x":1}"#), BASE_TS)).unwrap();

        assert_eq!(event.id, 7);
        assert_eq!(event.session_id, "abc123");
        assert_eq!(event.event_data, Some(serde_json::json!({"x": 1})));
        assert_eq!(event.occurred_at.timestamp(), BASE_TS);
    }

    #[test]
    fn test_user_event_invalid_json() {
        let err = UserEvent::try_from(row(Some("{not json"), BASE_TS)).unwrap_err();
        assert_eq!(err.to_string(), "Decoding error: Event 7 has invalid event_data JSON");
    }

    #[test]
    fn test_user_event_out_of_range_timestamp() {
        let err = UserEvent::try_from(row(None, i64::MAX)).unwrap_err();
        assert!(matches!(err, ReportingError::DecodingError { .. }));
    }

    #[test]
    fn test_hourly_count_rejects_bad_hour() {
        let err = HourlyEventCount::try_from(HourlyCountRow { hour: 24, count: 1 }).unwrap_err();
        assert_eq!(err.to_string(), "Decoding error: Invalid hour of day: 24");
    }

    #[test]
    fn test_user_event_serializes_camel_case() {
        let event = UserEvent::try_from(row(None, BASE_TS)).unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["sessionId"], "abc123");
        assert_eq!(json["eventType"], "click");
        assert_eq!(json["pageUrl"], "/home");
        assert_eq!(json["occurredAt"], "2024-02-01T00:00:00Z");
        assert!(json.get("eventData").is_none());
    }

    #[tokio::test]
    async fn test_service_over_repository() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let repo = Repository::new(pool);

        repo.insert_user_event(
            &NewUserEvent::new("s1", "page_view", BASE_TS).with_event_data(r#"{"ref":"ad"}"#),
        )
        .await
        .unwrap();
        repo.insert_user_event(&NewUserEvent::new("s2", "page_view", BASE_TS + 3600))
            .await
            .unwrap();

        let service: &dyn ReportingService = &repo;

        assert_eq!(service.get_user_events_count().await.unwrap(), 2);
        assert_eq!(service.get_user_events(1, 50).await.unwrap().len(), 2);
        assert_eq!(
            service.get_all_session_ids().await.unwrap(),
            BTreeSet::from(["s1".to_string(), "s2".to_string()])
        );
        assert_eq!(
            service.get_user_events_grouped_by_hour().await.unwrap(),
            [
                HourlyEventCount { hour: 0, count: 1 },
                HourlyEventCount { hour: 1, count: 1 },
            ]
        );
        assert_eq!(
            service.get_event_type_distribution().await.unwrap(),
            [EventTypeCount {
                event_type: "page_view".to_string(),
                count: 2,
            }]
        );

        let events = service.get_user_events_by_session_id("s1").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_data, Some(serde_json::json!({"ref": "ad"})));
    }
}
