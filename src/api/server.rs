//! Axum server setup and routing.

use axum::extract::Request;
use axum::http::{HeaderValue, Uri};
use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::api::{docs, handlers, middleware as api_middleware};
use crate::app_state::AppState;
use crate::error::{ReportingError, ReportingResult};

/// Build the reporting routes without any middleware.
///
/// `/getUserEvents/sessionIds`, `/count`, `/daily-events` and
/// `/event-type-distribution` are static segments and take priority over
/// the `{sessionId}` capture.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getUserEvents", get(handlers::user_events::get_user_events))
        .route(
            "/getUserEvents/sessionIds",
            get(handlers::user_events::get_session_ids),
        )
        .route(
            "/getUserEvents/count",
            get(handlers::user_events::get_user_events_count),
        )
        .route(
            "/getUserEvents/daily-events",
            get(handlers::user_events::get_daily_events),
        )
        .route(
            "/getUserEvents/event-type-distribution",
            get(handlers::user_events::get_event_type_distribution),
        )
        .route(
            "/getUserEvents/:sessionId",
            get(handlers::user_events::get_user_events_by_session_id),
        )
        .route("/getAdminEvents", get(handlers::admin::get_admin_events))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
}

/// Root segments whose spelling is matched case-insensitively.
const ROOT_SEGMENTS: [&str; 2] = ["getUserEvents", "getAdminEvents"];

/// Static segments under `/getUserEvents`, matched case-insensitively.
const USER_EVENT_SEGMENTS: [&str; 4] = [
    "sessionIds",
    "count",
    "daily-events",
    "event-type-distribution",
];

/// Build the full application: routes, middleware and state.
///
/// Route literals are matched case-insensitively: `/getuserevents/COUNT`
/// reaches the count handler. Session ids keep their original case.
pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(cors_origins))
        .layer(middleware::from_fn(api_middleware::logging::log_requests));

    let app = routes().layer(middleware_stack).with_state(state);

    // The rewrite has to run before routing, so it wraps the whole router
    Router::new().fallback_service(
        ServiceBuilder::new()
            .map_request(canonicalize_uri)
            .service(app),
    )
}

/// Rewrites route literals to their canonical spelling.
///
/// Returns `None` when the path is already canonical or is not one of ours.
fn canonicalize_path(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = path.split('/').collect();

    let root = *segments.get(1)?;
    segments[1] = ROOT_SEGMENTS
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(root))?;

    if segments[1] == "getUserEvents" && segments.len() == 3 {
        let sub = segments[2];
        if let Some(canonical) = USER_EVENT_SEGMENTS
            .iter()
            .copied()
            .find(|s| s.eq_ignore_ascii_case(sub))
        {
            segments[2] = canonical;
        }
    }

    let canonical = segments.join("/");
    (canonical != path).then_some(canonical)
}

fn canonicalize_uri(mut request: Request) -> Request {
    let Some(path) = canonicalize_path(request.uri().path()) else {
        return request;
    };

    let path_and_query = match request.uri().query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    match path_and_query.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(e) => warn!(error = %e, "Failed to rewrite request path"),
    }

    request
}

/// Run the Axum API server until the process is stopped.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or serving fails.
pub async fn run_server(
    state: AppState,
    port: u16,
    cors_origins: &[String],
) -> ReportingResult<()> {
    let app = build_app(state, cors_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ReportingError::server(format!("Failed to bind {addr}"), Some(Box::new(e)))
    })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ReportingError::server("API server failed", Some(Box::new(e))))?;

    info!("API server stopped");

    Ok(())
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let headers: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(header) => Some(header),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new().allow_origin(headers)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
