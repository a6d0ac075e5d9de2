use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use filmdex_core::{HttpListingClient, JsonDirStore, MovieLibrary};
use filmdex_server::api::create_router;
use filmdex_server::bootstrap::{init_tracing, load_runtime_config};
use filmdex_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing();

    let config = load_runtime_config()?;
    info!("Configuration loaded successfully");
    info!("Dataset directory: {:?}", config.dataset.dir);
    match &config.listing.source_url {
        Some(url) => info!("Movie list source: {}", url),
        None => info!("No movie list source configured"),
    }

    let store = Arc::new(JsonDirStore::new(config.dataset.dir.clone()));
    let listing = Arc::new(
        HttpListingClient::new(&config.listing).context("Failed to create listing client")?,
    );
    let library = Arc::new(MovieLibrary::new(store, listing));

    let state = Arc::new(AppState::new(config.clone(), library));
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
