//! reprise - main entry point
//!
//! Wires the playback controller to the rodio-backed media source and the
//! HTTP/SSE surface, stages the bundled demo media into the writable data
//! directory, and runs the server until a shutdown signal arrives.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reprise::api::{self, AppState};
use reprise::config::Config;
use reprise::playback::PlaybackController;
use reprise::source::rodio::RodioSource;
use reprise::source::MediaSource;
use reprise::sse::{BroadcastListener, SseBroadcaster};

/// Command-line arguments for reprise
#[derive(Parser, Debug)]
#[command(name = "reprise")]
#[command(about = "Single-track audio playback service")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "REPRISE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long, env = "REPRISE_PORT")]
    port: Option<u16>,

    /// Media file to serve (overrides configuration)
    #[arg(short, long, env = "REPRISE_MEDIA")]
    media: Option<PathBuf>,
}

fn rodio_factory() -> reprise::Result<Box<dyn MediaSource>> {
    Ok(Box::new(RodioSource::new()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = args.port.unwrap_or(config.port);
    let media_file = args.media.clone().unwrap_or_else(|| config.media_file());

    info!("Starting reprise on port {}", port);

    // Stage the bundled demo media into the writable data directory, the way
    // a packaged build does on first run. A failure here is not fatal: load
    // of a bad path degrades to a log event and the service stays usable.
    let media_file = match stage_media(&media_file, &config.data_dir()) {
        Ok(staged) => staged,
        Err(e) => {
            warn!("media staging failed, using source path directly: {e:#}");
            media_file
        }
    };
    info!("Media file: {}", media_file.display());

    let broadcaster = SseBroadcaster::new(100);
    let bridge = Arc::new(BroadcastListener::new(broadcaster.clone()));
    let controller = PlaybackController::new(
        Box::new(rodio_factory),
        bridge,
        config.controller_settings(),
    );

    controller.load(&media_file).await;

    // Build the application router
    let app_state = AppState {
        controller,
        broadcaster,
        media_file,
        port,
    };
    let app = api::create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Copy the demo media into the data directory; skipped when already staged.
fn stage_media(media_file: &Path, data_dir: &Path) -> Result<PathBuf> {
    let file_name = media_file
        .file_name()
        .context("media path has no file name")?;
    let staged = data_dir.join(file_name);
    if staged.exists() {
        return Ok(staged);
    }

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    std::fs::copy(media_file, &staged).with_context(|| {
        format!(
            "copying {} -> {}",
            media_file.display(),
            staged.display()
        )
    })?;
    info!("Staged {} -> {}", media_file.display(), staged.display());
    Ok(staged)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
