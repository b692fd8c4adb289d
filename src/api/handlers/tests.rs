use std::collections::BTreeSet;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use tower::ServiceExt; // for oneshot

use crate::api::server::routes;
use crate::app_state::AppState;
use crate::error::{ReportingError, ReportingResult};
use crate::observability::init_test_tracing;
use crate::reporting::{EventTypeCount, HourlyEventCount, ReportingService, UserEvent};

/// What the mock provider hands back for every call.
#[derive(Clone)]
enum Outcome {
    Data,
    Empty,
    Fail(&'static str),
}

struct MockReportingService {
    outcome: Outcome,
    calls: AtomicUsize,
    last_args: Mutex<Option<String>>,
}

impl MockReportingService {
    fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_args: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_args(&self) -> Option<String> {
        self.last_args.lock().unwrap().clone()
    }

    fn respond<T>(&self, args: String, data: impl FnOnce() -> T, empty: T) -> ReportingResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().unwrap() = Some(args);

        match self.outcome {
            Outcome::Data => Ok(data()),
            Outcome::Empty => Ok(empty),
            Outcome::Fail(msg) => Err(ReportingError::database(msg, None)),
        }
    }
}

fn sample_event(id: i64, session_id: &str) -> UserEvent {
    UserEvent {
        id,
        session_id: session_id.to_string(),
        event_type: "click".to_string(),
        page_url: None,
        event_data: None,
        occurred_at: DateTime::from_timestamp(1_706_745_600 + id, 0).unwrap(),
    }
}

#[async_trait]
impl ReportingService for MockReportingService {
    async fn get_user_events(
        &self,
        page_number: i64,
        size: i64,
    ) -> ReportingResult<Vec<UserEvent>> {
        self.respond(
            format!("{page_number},{size}"),
            || vec![sample_event(1, "s1"), sample_event(2, "s2")],
            Vec::new(),
        )
    }

    async fn get_all_session_ids(&self) -> ReportingResult<BTreeSet<String>> {
        self.respond(
            String::new(),
            || BTreeSet::from(["s2".to_string(), "s1".to_string()]),
            BTreeSet::new(),
        )
    }

    async fn get_user_events_by_session_id(
        &self,
        session_id: &str,
    ) -> ReportingResult<Vec<UserEvent>> {
        self.respond(
            session_id.to_string(),
            || vec![sample_event(1, session_id), sample_event(2, session_id)],
            Vec::new(),
        )
    }

    async fn get_user_events_count(&self) -> ReportingResult<u64> {
        self.respond(String::new(), || 42, 0)
    }

    async fn get_user_events_grouped_by_hour(&self) -> ReportingResult<Vec<HourlyEventCount>> {
        self.respond(
            String::new(),
            || {
                vec![
                    HourlyEventCount { hour: 9, count: 3 },
                    HourlyEventCount { hour: 17, count: 1 },
                ]
            },
            Vec::new(),
        )
    }

    async fn get_event_type_distribution(&self) -> ReportingResult<Vec<EventTypeCount>> {
        self.respond(
            String::new(),
            || {
                vec![EventTypeCount {
                    event_type: "click".to_string(),
                    count: 4,
                }]
            },
            Vec::new(),
        )
    }
}

fn app(mock: &Arc<MockReportingService>) -> Router {
    init_test_tracing();
    let provider: Arc<dyn ReportingService> = mock.clone();
    routes().with_state(AppState::from_arc(provider))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ==================== LIST EVENTS ====================

#[tokio::test]
async fn test_list_events_uses_defaults() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, body) = get(app(&mock), "/getUserEvents").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.last_args().as_deref(), Some("1,50"));

    let events: Vec<UserEvent> = serde_json::from_str(&body).unwrap();
    assert_eq!(events, [sample_event(1, "s1"), sample_event(2, "s2")]);
}

#[tokio::test]
async fn test_list_events_passes_paging() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, _) = get(app(&mock), "/getUserEvents?pageNumber=3&size=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.last_args().as_deref(), Some("3,10"));
}

#[tokio::test]
async fn test_list_events_rejects_page_number_below_one() {
    for uri in ["/getUserEvents?pageNumber=0", "/getUserEvents?pageNumber=-4&size=0"] {
        let mock = MockReportingService::new(Outcome::Data);
        let (status, body) = get(app(&mock), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Page number must be 1 or greater.");
        assert_eq!(mock.calls(), 0);
    }
}

#[tokio::test]
async fn test_list_events_rejects_size_below_one() {
    for uri in ["/getUserEvents?size=0", "/getUserEvents?pageNumber=2&size=-1"] {
        let mock = MockReportingService::new(Outcome::Data);
        let (status, body) = get(app(&mock), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Page size must be 1 or greater");
        assert_eq!(mock.calls(), 0);
    }
}

#[tokio::test]
async fn test_list_events_query_keys_ignore_case() {
    for uri in [
        "/getUserEvents?pagenumber=0",
        "/getUserEvents?PageNumber=0",
        "/getUserEvents?PAGENUMBER=0&size=5",
    ] {
        let mock = MockReportingService::new(Outcome::Data);
        let (status, body) = get(app(&mock), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "Page number must be 1 or greater.", "{uri}");
        assert_eq!(mock.calls(), 0, "{uri}");
    }

    let mock = MockReportingService::new(Outcome::Data);
    let (status, _) = get(app(&mock), "/getUserEvents?PageNumber=2&Size=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.last_args().as_deref(), Some("2,5"));
}

#[tokio::test]
async fn test_list_events_rejects_unparseable_query() {
    for (uri, message) in [
        (
            "/getUserEvents?pageNumber=abc",
            "The value 'abc' is not valid for pageNumber.",
        ),
        (
            "/getUserEvents?pageNumber=3000000000",
            "The value '3000000000' is not valid for pageNumber.",
        ),
        ("/getUserEvents?size=1.5", "The value '1.5' is not valid for size."),
    ] {
        let mock = MockReportingService::new(Outcome::Data);
        let (status, body) = get(app(&mock), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, message, "{uri}");
        assert_eq!(mock.calls(), 0, "{uri}");
    }
}

#[tokio::test]
async fn test_list_events_empty_page_is_not_found() {
    let mock = MockReportingService::new(Outcome::Empty);
    let (status, body) = get(app(&mock), "/getUserEvents?pageNumber=99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "No user events found for the requested page.");
    assert_eq!(mock.calls(), 1);
}

// ==================== SESSION IDS ====================

#[tokio::test]
async fn test_session_ids() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, body) = get(app(&mock), "/getUserEvents/sessionIds").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"["s1","s2"]"#);
}

#[tokio::test]
async fn test_session_ids_empty_is_not_found() {
    let mock = MockReportingService::new(Outcome::Empty);
    let (status, body) = get(app(&mock), "/getUserEvents/sessionIds").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "No user event session ids were found.");
}

// ==================== EVENTS BY SESSION ====================

#[tokio::test]
async fn test_events_by_session() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, body) = get(app(&mock), "/getUserEvents/abc123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.calls(), 1);
    assert_eq!(mock.last_args().as_deref(), Some("abc123"));

    let events: Vec<UserEvent> = serde_json::from_str(&body).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.session_id == "abc123"));
}

#[tokio::test]
async fn test_events_by_session_decodes_path() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, _) = get(app(&mock), "/getUserEvents/a%20b").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.last_args().as_deref(), Some("a b"));
}

#[tokio::test]
async fn test_events_by_session_rejects_blank_id() {
    for uri in ["/getUserEvents/%20", "/getUserEvents/%20%09%20"] {
        let mock = MockReportingService::new(Outcome::Data);
        let (status, body) = get(app(&mock), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Session Id cannot be null or empty.");
        assert_eq!(mock.calls(), 0);
    }
}

#[tokio::test]
async fn test_events_by_session_empty_is_not_found() {
    let mock = MockReportingService::new(Outcome::Empty);
    let (status, body) = get(app(&mock), "/getUserEvents/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "No user events found for the requested session.");
}

// ==================== COUNT & AGGREGATES ====================

#[tokio::test]
async fn test_count() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, body) = get(app(&mock), "/getUserEvents/count").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "42");
    // Static segment wins over the session id capture
    assert_eq!(mock.last_args().as_deref(), Some(""));
}

#[tokio::test]
async fn test_count_zero_is_not_found() {
    let mock = MockReportingService::new(Outcome::Empty);
    let (status, body) = get(app(&mock), "/getUserEvents/count").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "No user events were found.");
}

#[tokio::test]
async fn test_daily_events() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, body) = get(app(&mock), "/getUserEvents/daily-events").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"hour":9,"count":3},{"hour":17,"count":1}]"#);
}

#[tokio::test]
async fn test_event_type_distribution() {
    let mock = MockReportingService::new(Outcome::Data);
    let (status, body) = get(app(&mock), "/getUserEvents/event-type-distribution").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"eventType":"click","count":4}]"#);
}

#[tokio::test]
async fn test_aggregates_empty_are_not_found() {
    for uri in [
        "/getUserEvents/daily-events",
        "/getUserEvents/event-type-distribution",
    ] {
        let mock = MockReportingService::new(Outcome::Empty);
        let (status, body) = get(app(&mock), uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, "No user events were found.", "{uri}");
    }
}

// ==================== PROVIDER FAILURES ====================

#[tokio::test]
async fn test_provider_errors_become_bad_request() {
    for uri in [
        "/getUserEvents",
        "/getUserEvents/sessionIds",
        "/getUserEvents/abc123",
        "/getUserEvents/count",
        "/getUserEvents/daily-events",
        "/getUserEvents/event-type-distribution",
    ] {
        let mock = MockReportingService::new(Outcome::Fail("database is locked"));
        let (status, body) = get(app(&mock), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "Database error: database is locked", "{uri}");
        assert_eq!(mock.calls(), 1, "{uri}");
    }
}

// ==================== ADMIN ====================

#[tokio::test]
async fn test_admin_events_is_inert() {
    for outcome in [Outcome::Data, Outcome::Empty, Outcome::Fail("boom")] {
        let mock = MockReportingService::new(outcome);
        let (status, body) = get(app(&mock), "/getAdminEvents").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(mock.calls(), 0);
    }
}
