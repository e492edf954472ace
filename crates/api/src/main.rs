use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blueflame_api::config::ServerConfig;
use blueflame_api::router::build_app_router;
use blueflame_api::state::AppState;
use blueflame_core::prompts::PromptLibrary;
use blueflame_pipeline::backend::build_backend;
use blueflame_pipeline::store::{EvictionSweeper, JobStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueflame_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        mock = config.mock_mode,
        "Loaded server configuration",
    );

    // --- Mock asset directory ---
    std::fs::create_dir_all(&config.mock_assets_dir)
        .context("Failed to create mock assets directory")?;

    // --- Prompt library ---
    let prompts = Arc::new(PromptLibrary::load(&config.prompts_path));

    // --- Generation backend ---
    let backend = build_backend(config.mock_mode, Arc::clone(&prompts))
        .context("Failed to initialize generation backend")?;
    tracing::info!(mock = config.mock_mode, "Generation backend ready");

    // --- Job store and eviction sweeper ---
    let jobs = Arc::new(JobStore::new());
    let sweeper_cancel = CancellationToken::new();
    let sweeper = EvictionSweeper::new(Arc::clone(&jobs), config.job_ttl());
    let sweeper_handle = tokio::spawn(sweeper.run(sweeper_cancel.clone()));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        jobs,
        prompts,
        backend,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweeper_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweeper_handle).await;
    tracing::info!("Eviction sweeper stopped");

    // In-flight simulator tasks are abandoned with the process; their
    // records live only in this process anyway.
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
