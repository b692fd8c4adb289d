//! Configuration management for the reporting service.
//!
//! Configuration is loaded from environment variables using the `dotenvy`
//! crate (a `.env` file is read first when present). All operations return
//! [`ReportingResult`].
//!
//! ## Environment Variables
//!
//! Optional (with defaults):
//! - `DATABASE_URL`: SQLite connection string (default: "sqlite:./user_events.db")
//! - `API_PORT`: HTTP listen port (default: 8080)
//! - `CORS_ORIGINS`: Comma separated allowed origins (default: any)
//! - `RUST_LOG`, `LOG_JSON`, `LOG_FILE`: Logging, see [`crate::observability`]
//!
//! ## Example
//!
//! ```no_run
//! use user_event_reporting::config::Config;
//! use user_event_reporting::error::ReportingResult;
//!
//! # fn main() -> ReportingResult<()> {
//! let config = Config::from_env()?;
//! println!("Listening on port {}", config.api_port());
//! # Ok(())
//! # }
//! ```

use crate::error::{ReportingError, ReportingResult};
use std::env;

/// Default SQLite database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./user_events.db";

/// Default HTTP port.
pub const DEFAULT_API_PORT: u16 = 8080;

/// Runtime configuration for the reporting service.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string
    database_url: String,

    /// HTTP listen port
    api_port: u16,

    /// Allowed CORS origins (empty means any)
    cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is set but empty
    /// - `API_PORT` is not a valid non-zero port number
    pub fn from_env() -> ReportingResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// [`Config::from_env`] delegates here with `std::env::var`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> ReportingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        if database_url.trim().is_empty() {
            return Err(ReportingError::config("DATABASE_URL cannot be empty", None));
        }

        let api_port = match lookup("API_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ReportingError::config(
                    format!("API_PORT must be a valid port number, got: {raw}"),
                    Some(Box::new(e)),
                )
            })?,
            None => DEFAULT_API_PORT,
        };

        if api_port == 0 {
            return Err(ReportingError::config("API_PORT cannot be zero", None));
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            database_url,
            api_port,
            cors_origins,
        })
    }

    /// Override the database URL (used by CLI flags).
    #[must_use]
    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    /// Override the listen port (used by CLI flags).
    #[must_use]
    pub const fn with_api_port(mut self, api_port: u16) -> Self {
        self.api_port = api_port;
        self
    }

    /// Get the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Get the HTTP listen port.
    #[must_use]
    pub const fn api_port(&self) -> u16 {
        self.api_port
    }

    /// Get the allowed CORS origins.
    #[must_use]
    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(ToString::to_string)
        .collect()
}
