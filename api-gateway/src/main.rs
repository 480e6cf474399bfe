//! Fund tracker API server

use std::sync::Arc;

use api_gateway::config::AppConfig;
use api_gateway::{app, AppState};
use clap::Parser;
use dotenv::dotenv;
use fund_service::{FundService, FundServiceConfig, StorageBackend};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Fund tracker API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (overrides API_ADDR)
    #[clap(short, long)]
    addr: Option<String>,

    /// Storage backend: memory or postgres (overrides STORAGE_BACKEND)
    #[clap(short, long)]
    storage: Option<StorageBackend>,

    /// Database URL (overrides DATABASE_URL)
    #[clap(short, long)]
    database_url: Option<String>,

    /// Database pool size (overrides DB_POOL_SIZE)
    #[clap(short, long)]
    pool_size: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();
    let app_config = AppConfig::new();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let log_level = if app_config.debug { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,fund_service=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    // Environment first, command line on top
    let mut service_config = FundServiceConfig::from_env()?;
    if let Some(storage) = args.storage {
        service_config.storage = storage;
    }
    if let Some(url) = args.database_url {
        service_config.database_url = url;
    }
    if let Some(pool_size) = args.pool_size {
        service_config.db_pool_size = pool_size;
    }

    info!(
        "Starting fund service with {} storage, database pool size: {}",
        service_config.storage, service_config.db_pool_size
    );

    // Initialize services
    let fund_service = FundService::with_config(&service_config).await?;
    let state = Arc::new(AppState::new(fund_service));
    let router = app(state, log_level);

    // Start the server
    let addr: std::net::SocketAddr = args.addr.unwrap_or(app_config.addr).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
