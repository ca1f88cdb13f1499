// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use channel_telemetry::application::dashboard_service::DashboardService;
use channel_telemetry::application::telemetry_service::TelemetryService;
use channel_telemetry::infrastructure::config::{load_fields_config, load_service_config};
use channel_telemetry::infrastructure::thingspeak_client::ThingSpeakClient;
use channel_telemetry::presentation::app_state::AppState;
use channel_telemetry::presentation::router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let service_config = load_service_config()?;
    let bindings = load_fields_config()?.bindings()?;
    let channel = service_config.channel.channel_ref()?;

    // Create feed source (infrastructure layer)
    let client = Arc::new(ThingSpeakClient::new(
        &service_config.client.base_url,
        service_config.client.timeout(),
    )?);

    // Create services (application layer)
    let telemetry_service = TelemetryService::new(client, service_config.client.fetch_policy());
    let dashboard_service = DashboardService::new(bindings);

    let state = Arc::new(AppState {
        telemetry_service,
        dashboard_service,
        channel,
        default_results: service_config.channel.results,
    });

    let addr: SocketAddr = service_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", service_config.server.bind))?;

    tracing::info!(
        %addr,
        channel = state.channel.channel_id(),
        results = state.default_results,
        "Starting channel-telemetry service"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
