//! Entry point for the user event reporting service.
//!
//! `main.rs` only initializes the runtime and tracing, then delegates to
//! [`cli::run`](user_event_reporting::cli::run).

use tracing::error;
use user_event_reporting::{cli, observability};

#[tokio::main]
async fn main() {
    // Logging is configured from the environment:
    // - RUST_LOG: log level / filter directives
    // - LOG_JSON: JSON console output ("true" or "false")
    // - LOG_FILE: also write JSON logs to a daily-rotated file
    let log_level = std::env::var("RUST_LOG").ok();
    let log_file = std::env::var("LOG_FILE").ok().map(std::path::PathBuf::from);
    let json_output = std::env::var("LOG_JSON")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    // Held until exit so buffered file logs are flushed
    let _log_guard = match observability::init_tracing(log_level, log_file, json_output) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run().await {
        error!(error = %e, "Application error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
