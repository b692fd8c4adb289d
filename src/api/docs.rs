//! OpenAPI documentation for the REST API.

use axum::Json;
use utoipa::OpenApi;

use crate::api::handlers;

/// OpenAPI documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user_events::get_user_events,
        handlers::user_events::get_session_ids,
        handlers::user_events::get_user_events_by_session_id,
        handlers::user_events::get_user_events_count,
        handlers::user_events::get_daily_events,
        handlers::user_events::get_event_type_distribution,
        handlers::admin::get_admin_events,
    ),
    components(schemas(
        crate::reporting::UserEvent,
        crate::reporting::HourlyEventCount,
        crate::reporting::EventTypeCount,
    )),
    tags(
        (name = "User Events", description = "Queries over recorded user events"),
        (name = "Admin", description = "Admin endpoints"),
    ),
    info(
        title = "User Event Reporting API",
        version = "1.0.0",
        description = "Read-only reporting over recorded user events",
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
