use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use intake::application::services::UploadIngestor;
use intake::infrastructure::dashboard::HttpDashboardClient;
use intake::infrastructure::observability::{TracingConfig, init_tracing};
use intake::infrastructure::storage::LocalStorageArea;
use intake::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(environment.as_str(), &settings.logging),
        settings.server.port,
    );

    let storage = Arc::new(LocalStorageArea::with_write_chunk_bytes(
        &settings.storage.root,
        settings.storage.write_chunk_bytes,
    ));
    tracing::info!(root = %storage.root().display(), "Storage area configured");

    let dashboard_source = Arc::new(
        HttpDashboardClient::new(
            settings.dashboard.url.clone(),
            Duration::from_secs(settings.dashboard.timeout_secs),
        )
        .context("Failed to build dashboard client")?,
    );

    let state = AppState {
        upload_ingestor: Arc::new(UploadIngestor::new(storage)),
        dashboard_source,
        max_upload_bytes: settings.server.max_upload_bytes,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
