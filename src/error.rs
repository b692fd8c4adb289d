//! Error types for the user event reporting service.
//!
//! This module provides a unified error type [`ReportingError`] covering
//! everything that can fail below the HTTP layer: configuration loading,
//! database access, row decoding and server startup.
//!
//! # Design
//!
//! - [`ReportingError::ConfigError`]: Configuration and environment issues
//! - [`ReportingError::DatabaseError`]: Connection, migration and query failures
//! - [`ReportingError::DecodingError`]: Stored rows that cannot be turned into results
//! - [`ReportingError::ServerError`]: Listener binding and serving failures
//!
//! The HTTP layer never inspects the variant: any error coming back from the
//! reporting provider is surfaced to the caller through its display text.
//!
//! # Example
//!
//! ```
//! use user_event_reporting::error::{ReportingError, ReportingResult};
//!
//! fn validate_port(port: u16) -> ReportingResult<()> {
//!     if port == 0 {
//!         return Err(ReportingError::config("port cannot be zero", None));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Result type alias using [`ReportingError`].
pub type ReportingResult<T> = Result<T, ReportingError>;

/// Boxed source error carried by [`ReportingError`] variants.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for the reporting service.
#[derive(Debug)]
pub enum ReportingError {
    /// Configuration or environment variable errors.
    ConfigError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// Database operation errors.
    ///
    /// Variants include:
    /// - Connection failures
    /// - Migration failures
    /// - Query execution errors
    DatabaseError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// A stored row could not be converted into a reporting result.
    DecodingError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// HTTP server startup or serving errors.
    ServerError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },
}

impl ReportingError {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use user_event_reporting::error::ReportingError;
    ///
    /// let err = ReportingError::config("API_PORT must be a valid port", None);
    /// assert!(matches!(err, ReportingError::ConfigError { .. }));
    /// ```
    #[must_use]
    pub fn config(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source,
        }
    }

    /// Create a new database error.
    #[must_use]
    pub fn database(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::DatabaseError {
            message: message.into(),
            source,
        }
    }

    /// Create a new decoding error.
    #[must_use]
    pub fn decoding(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::DecodingError {
            message: message.into(),
            source,
        }
    }

    /// Create a new server error.
    #[must_use]
    pub fn server(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::ServerError {
            message: message.into(),
            source,
        }
    }
}

impl fmt::Display for ReportingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, .. } => write!(f, "Configuration error: {message}"),
            Self::DatabaseError { message, .. } => write!(f, "Database error: {message}"),
            Self::DecodingError { message, .. } => write!(f, "Decoding error: {message}"),
            Self::ServerError { message, .. } => write!(f, "Server error: {message}"),
        }
    }
}

impl std::error::Error for ReportingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. }
            | Self::DatabaseError { source, .. }
            | Self::DecodingError { source, .. }
            | Self::ServerError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
        }
    }
}
