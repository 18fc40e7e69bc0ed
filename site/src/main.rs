//! Wayfare HTTP server.

use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_platform::{PlatformApi, PlatformClient};
use wayfare_site::email::LogMailer;
use wayfare_site::server::{build_router, AppState};
use wayfare_site::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env first so the filter and config see it
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Wayfare HTTP server");

    let config = Config::from_env();
    info!(
        host = %config.server.host,
        port = config.server.port,
        platform_configured = config.platform.is_some(),
        "Configuration loaded"
    );

    // The platform handle is optional: without credentials, dependent
    // features degrade instead of the process refusing to start.
    let platform: Option<Arc<dyn PlatformApi>> = config
        .platform
        .as_ref()
        .map(|p| Arc::new(PlatformClient::new(&p.url, &p.anon_key)) as Arc<dyn PlatformApi>);

    let state = AppState::new(&config, platform, LogMailer::shared());
    let booking_desk = Arc::clone(&state.booking_desk);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain in-flight booking effects before exiting.
    if let Err(err) = booking_desk.shutdown(Duration::from_secs(10)).await {
        error!(error = %err, "Booking pipeline shutdown incomplete");
    }

    info!("Server stopped");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
