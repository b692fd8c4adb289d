//! Unified API error handling.
//!
//! Every handler failure ends up as one of two plain-text responses:
//! 400 for invalid input and for any provider error, 404 for empty results.
//! Provider errors are deliberately not mapped to 5xx.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ReportingError;

/// API-specific error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid request parameters, or a failure reported by the provider.
    BadRequest(String),
    /// The provider returned no results.
    NotFound(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
        };

        (status, message).into_response()
    }
}

impl From<ReportingError> for ApiError {
    fn from(err: ReportingError) -> Self {
        warn!(error = %err, "Reporting provider failed, responding with 400");
        Self::BadRequest(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
