use std::net::SocketAddr;

use fence_core::catalog::Catalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fence_api::config::ServerConfig;
use fence_api::router::build_app_router;
use fence_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fence_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        static_dir = %config.static_dir.display(),
        "Loaded server configuration"
    );

    // --- Catalog ---
    let catalog = match &config.catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).expect("Failed to read CATALOG_PATH");
            Catalog::from_json_str(&json).expect("Invalid catalog file")
        }
        None => Catalog::builtin().expect("Built-in catalog is invalid"),
    };
    tracing::info!(entries = catalog.len(), "Product catalog loaded");

    // --- Asset directory ---
    let asset_path = config.asset_path();
    tokio::fs::create_dir_all(&asset_path)
        .await
        .expect("Failed to create asset directory");
    tracing::info!(path = %asset_path.display(), "Asset directory ready");

    // --- Router ---
    let state = AppState::new(config.clone(), catalog);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
