//! User event reporting endpoints.
//!
//! Each handler validates its inputs, makes exactly one provider call and
//! maps the outcome: results → 200 JSON, nothing found → 404, provider
//! error → 400 with the error text.

use std::collections::BTreeSet;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::instrument;

use crate::api::middleware::error::ApiError;
use crate::api::models::{
    UserEventsQuery, NO_EVENTS, NO_EVENTS_FOR_PAGE, NO_EVENTS_FOR_SESSION, NO_SESSION_IDS,
    PAGE_NUMBER_INVALID, PAGE_SIZE_INVALID, SESSION_ID_INVALID,
};
use crate::app_state::AppState;
use crate::reporting::{EventTypeCount, HourlyEventCount, UserEvent};

/// Wraps a non-empty result in `Json`, or turns an empty one into a 404.
fn found<C>(items: C, not_found: &str) -> Result<Json<C>, ApiError>
where
    for<'a> &'a C: IntoIterator,
{
    if (&items).into_iter().next().is_none() {
        Err(ApiError::NotFound(not_found.to_string()))
    } else {
        Ok(Json(items))
    }
}

#[utoipa::path(
    get,
    path = "/getUserEvents",
    params(UserEventsQuery),
    responses(
        (status = 200, description = "One page of user events", body = [UserEvent]),
        (
            status = 400,
            description = "Invalid paging parameters or provider failure",
            body = String
        ),
        (status = 404, description = "The requested page is empty", body = String)
    ),
    tag = "User Events"
)]
/// Returns one page of recorded user events.
///
/// Query keys are matched case-insensitively, so `?pagenumber=0` is
/// validated the same as `?pageNumber=0`.
#[instrument(skip(state, params))]
pub async fn get_user_events(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<UserEvent>>, ApiError> {
    let Query(params) = params?;
    let query = UserEventsQuery::from_pairs(&params).map_err(ApiError::BadRequest)?;

    if query.page_number < 1 {
        return Err(ApiError::BadRequest(PAGE_NUMBER_INVALID.to_string()));
    }
    if query.size < 1 {
        return Err(ApiError::BadRequest(PAGE_SIZE_INVALID.to_string()));
    }

    let events = state
        .reporting
        .get_user_events(i64::from(query.page_number), i64::from(query.size))
        .await?;

    found(events, NO_EVENTS_FOR_PAGE)
}

#[utoipa::path(
    get,
    path = "/getUserEvents/sessionIds",
    responses(
        (status = 200, description = "Distinct session ids", body = [String]),
        (status = 400, description = "Provider failure", body = String),
        (status = 404, description = "No session ids recorded", body = String)
    ),
    tag = "User Events"
)]
/// Returns every distinct session id.
#[instrument(skip(state))]
pub async fn get_session_ids(
    State(state): State<AppState>,
) -> Result<Json<BTreeSet<String>>, ApiError> {
    let session_ids = state.reporting.get_all_session_ids().await?;

    found(session_ids, NO_SESSION_IDS)
}

#[utoipa::path(
    get,
    path = "/getUserEvents/{sessionId}",
    params(
        ("sessionId" = String, Path, description = "Session identifier")
    ),
    responses(
        (status = 200, description = "Events recorded for the session", body = [UserEvent]),
        (status = 400, description = "Blank session id or provider failure", body = String),
        (status = 404, description = "No events for the session", body = String)
    ),
    tag = "User Events"
)]
/// Returns the events recorded for one session.
#[instrument(skip(state, session_id))]
pub async fn get_user_events_by_session_id(
    State(state): State<AppState>,
    session_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<UserEvent>>, ApiError> {
    let Path(session_id) = session_id?;

    if session_id.trim().is_empty() {
        return Err(ApiError::BadRequest(SESSION_ID_INVALID.to_string()));
    }

    let events = state
        .reporting
        .get_user_events_by_session_id(&session_id)
        .await?;

    found(events, NO_EVENTS_FOR_SESSION)
}

#[utoipa::path(
    get,
    path = "/getUserEvents/count",
    responses(
        (status = 200, description = "Total number of events", body = u64),
        (status = 400, description = "Provider failure", body = String),
        (status = 404, description = "No events recorded", body = String)
    ),
    tag = "User Events"
)]
/// Returns the total number of recorded events.
#[instrument(skip(state))]
pub async fn get_user_events_count(State(state): State<AppState>) -> Result<Json<u64>, ApiError> {
    let count = state.reporting.get_user_events_count().await?;

    if count == 0 {
        return Err(ApiError::NotFound(NO_EVENTS.to_string()));
    }

    Ok(Json(count))
}

#[utoipa::path(
    get,
    path = "/getUserEvents/daily-events",
    responses(
        (status = 200, description = "Event counts per hour of day", body = [HourlyEventCount]),
        (status = 400, description = "Provider failure", body = String),
        (status = 404, description = "No events recorded", body = String)
    ),
    tag = "User Events"
)]
/// Returns event counts grouped by hour of day.
#[instrument(skip(state))]
pub async fn get_daily_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<HourlyEventCount>>, ApiError> {
    let stats = state.reporting.get_user_events_grouped_by_hour().await?;

    found(stats, NO_EVENTS)
}

#[utoipa::path(
    get,
    path = "/getUserEvents/event-type-distribution",
    responses(
        (status = 200, description = "Event counts per event type", body = [EventTypeCount]),
        (status = 400, description = "Provider failure", body = String),
        (status = 404, description = "No events recorded", body = String)
    ),
    tag = "User Events"
)]
/// Returns event counts per event type.
#[instrument(skip(state))]
pub async fn get_event_type_distribution(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventTypeCount>>, ApiError> {
    let distribution = state.reporting.get_event_type_distribution().await?;

    found(distribution, NO_EVENTS)
}
