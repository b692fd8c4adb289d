//! Admin endpoints.

use axum::http::StatusCode;

#[utoipa::path(
    get,
    path = "/getAdminEvents",
    responses(
        (status = 200, description = "Always succeeds with an empty body")
    ),
    tag = "Admin"
)]
/// Placeholder. Always 200 with an empty body; touches no data source.
pub async fn get_admin_events() -> StatusCode {
    StatusCode::OK
}
