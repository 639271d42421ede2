//! HTTP listener and shutdown handling.

use anyhow::{Context, Result};
use axum::Router;
use tubely_core::Config;

/// Serve `app` on `0.0.0.0:{PORT}` until SIGINT or SIGTERM.
///
/// In-flight uploads are allowed to finish; their temp files are removed as
/// their handlers return.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        storage_backend = %config.storage_backend(),
        max_video_mb = config.max_video_size_bytes() / 1024 / 1024,
        content_type = %config.video_allowed_content_type(),
        ffprobe = %config.ffprobe_path(),
        ffmpeg = %config.ffmpeg_path(),
        "Listening for uploads"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Shutting down"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Shutting down"),
    }
}
