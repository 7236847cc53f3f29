//! hello-loco: a minimal HTTP responder.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration, applies command line overrides, builds the router and starts
//! the HTTP listener.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hello_loco::config::{AppConfig, LoggingConfig, DEFAULT_LOG_FILTER};
use hello_loco::http::start_server;
use hello_loco::routes::create_router;
use hello_loco::state::AppState;
use hello_loco::AppError;

/// hello-loco: answers `/` with a fixed welcome message
#[derive(Parser, Debug)]
#[command(name = "hello-loco", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "hello_loco=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(filter: &str, logging: &LoggingConfig) -> Result<(), AppError> {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));

    let result = if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| AppError::Logging(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration before tracing so the log format is known
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;

    // CLI > config file > defaults
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    config.validate()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging)?;

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        log_format = %config.logging.format,
        "Loaded configuration"
    );

    let state = AppState::new();
    let app = create_router(state);

    if let Err(e) = start_server(app, &config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    tracing::info!("Server stopped");
    Ok(())
}
