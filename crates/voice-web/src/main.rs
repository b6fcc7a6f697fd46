//! HTTP backend turning worker voice notes into stored profiles.
//!
//! Audio uploaded to `/voice/upload` is sent to a speech-to-text service, run
//! through the keyword extractor, and stored as a profile in SQLite.

mod config;
mod error;
mod routes;
mod state;

use clap::{Parser, Subcommand};
use database::Database;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "voice-web")]
#[command(about = "Turn worker voice notes into stored profiles")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run migrations and start the HTTP server (default)
    Serve,
    /// Create the database schema
    InitDb,
    /// Drop and recreate the database schema (debug mode only)
    ResetDb,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;
    init_tracing(config.debug);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::InitDb => init_db(&config).await,
        Command::ResetDb => reset_db(&config).await,
    }
}

/// Install the log subscriber. `RUST_LOG` overrides the debug-derived default.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(addr = %config.addr, debug = config.debug, "Starting voice web server");

    if config.uses_dev_secret() && !config.debug {
        warn!("SECRET_KEY is not set; using the development default");
    }

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let profiles = database::profile::count_profiles(db.pool()).await?;
    info!(profiles, "Profile store ready");

    // Build transcriber
    let transcriber = config.transcriber()?;
    info!(transcriber = transcriber.name(), "Transcriber ready");

    // Build application
    let state = AppState::new(db.clone(), transcriber);
    let app = routes::app(state, config.max_upload_bytes);

    // Start server
    info!(addr = %config.addr, "Voice web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Voice web server stopped");

    Ok(())
}

async fn init_db(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    db.close().await;

    info!("Database initialized successfully");
    Ok(())
}

async fn reset_db(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if !config.debug {
        error!("Refusing to reset the database outside debug mode");
        return Err("reset-db requires APP_DEBUG=1".into());
    }

    let db = Database::connect(&config.database_url).await?;
    db.reset().await?;
    db.close().await;

    info!("Database dropped and recreated successfully");
    Ok(())
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
