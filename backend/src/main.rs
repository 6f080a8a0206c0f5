mod domain;
mod application;
mod infrastructure;

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use application::dashboard::queries::GetStatusHandler;
use infrastructure::driven::{GrpcFileServerConnector, SysinfoProcessInspector};
use infrastructure::driving::create_router;
use infrastructure::settings::Settings;
use infrastructure::{telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let settings = Settings::load().context("Failed to load settings")?;
    telemetry::init_tracing(&settings.log_level);

    info!("AFS dashboard bridge starting...");
    info!(
        "AFS server: {}, watching process: {}",
        settings.server_address, settings.process_name
    );

    let connector = GrpcFileServerConnector::new(
        settings.server_address.clone(),
        settings.connect_timeout(),
        settings.rpc_timeout(),
    );
    let inspector = SysinfoProcessInspector::new(settings.cpu_sample());
    info!("CPU sample interval: {:?}", inspector.cpu_sample());
    let get_status = GetStatusHandler::new(
        Arc::new(connector),
        Arc::new(inspector),
        settings.process_name.clone(),
    )
    .with_request_timeout(settings.request_timeout());

    let app = create_router(AppState {
        get_status: Arc::new(get_status),
    });

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
