//! Energy usage upload API service.
//!
//! Accepts multipart CSV uploads of daily energy readings, stores raw
//! files in blob storage and validated readings in PostgreSQL, and
//! returns validation alerts plus threshold violations.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use upload_api::config::ServiceConfig;
use upload_api::server;
use upload_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "upload-api")]
#[command(about = "Energy usage upload API server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting energy usage upload API");

    let config = ServiceConfig::from_env()?;
    let state = Arc::new(AppState::new(config).await?);

    let app = server::build_router(state);

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
