//! Command-line interface for the reporting service.
//!
//! # Commands
//!
//! - `serve`: Run the HTTP reporting API
//! - `init-db`: Create the database and apply migrations, then exit
//!
//! # Example
//!
//! ```bash
//! user-event-reporting serve --port 8080
//! user-event-reporting init-db --database-url sqlite:./user_events.db
//! ```

use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::server::run_server;
use crate::app_state::AppState;
use crate::config::Config;
use crate::db::{create_pool, repository::Repository};
use crate::error::ReportingResult;

/// User event reporting API
#[derive(Parser, Debug)]
#[command(name = "user-event-reporting")]
#[command(about = "Read-only HTTP reporting over recorded user events", long_about = None)]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP reporting API
    Serve {
        /// Listen port (overrides API_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite connection string (overrides DATABASE_URL)
        #[arg(short, long)]
        database_url: Option<String>,
    },

    /// Create the database and apply migrations
    InitDb {
        /// SQLite connection string (overrides DATABASE_URL)
        #[arg(short, long)]
        database_url: Option<String>,
    },
}

/// Parse CLI arguments and execute the appropriate command.
///
/// # Errors
///
/// Returns an error if configuration, database setup or the server fails.
pub async fn run() -> ReportingResult<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { port, database_url } => {
            let config = apply_overrides(config, port, database_url);
            run_serve_command(&config).await
        }
        Commands::InitDb { database_url } => {
            let config = apply_overrides(config, None, database_url);
            run_init_db_command(&config).await
        }
    }
}

fn apply_overrides(config: Config, port: Option<u16>, database_url: Option<String>) -> Config {
    let config = match database_url {
        Some(url) => config.with_database_url(url),
        None => config,
    };
    match port {
        Some(port) => config.with_api_port(port),
        None => config,
    }
}

async fn run_serve_command(config: &Config) -> ReportingResult<()> {
    let pool = create_pool(config.database_url()).await?;
    let repository = Repository::new(pool);
    repository.health_check().await?;

    let state = AppState::new(repository);
    run_server(state, config.api_port(), config.cors_origins()).await
}

async fn run_init_db_command(config: &Config) -> ReportingResult<()> {
    let pool = create_pool(config.database_url()).await?;
    pool.close().await;

    info!(database_url = config.database_url(), "Database initialized");
    println!("Database ready at {}", config.database_url());

    Ok(())
}
