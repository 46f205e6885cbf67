//! diskkv Server Binary
//!
//! Serves a store over HTTP.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use diskkv::config::{Backend, PORT_ENV};
use diskkv::http::build_router;
use diskkv::{store, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// diskkv Server
#[derive(Parser, Debug)]
#[command(name = "diskkv-server")]
#[command(about = "File-backed key-value store over HTTP")]
#[command(version)]
struct Args {
    /// Storage directory (defaults to $DISKKV_STORAGE_DIR, then the system temp directory)
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    /// Listen address (host:port); defaults to 0.0.0.0 on $PORT, else 8080
    #[arg(short, long)]
    listen: Option<String>,

    /// Store implementation
    #[arg(short, long, value_enum, default_value_t = BackendArg::File)]
    backend: BackendArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    File,
    Memory,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::File => Backend::File,
            BackendArg::Memory => Backend::Memory,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,diskkv=debug,tower_http=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    // Environment first, flags override
    let env_config = Config::from_env();
    let config = Config::builder()
        .storage_dir(args.storage_dir.unwrap_or(env_config.storage_dir))
        .listen_addr(args.listen.unwrap_or(env_config.listen_addr))
        .backend(args.backend.into())
        .build();

    tracing::info!("diskkv Server v{}", diskkv::VERSION);
    tracing::info!("Storage directory: {}", config.storage_dir.display());
    tracing::info!("Backend: {:?}", config.backend);

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("{} (set --listen or {})", e, PORT_ENV);
            std::process::exit(1);
        }
    };

    let app = build_router(store::open_store(&config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting up on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

/// Resolve on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, initiating shutdown...");
}
