// Main entry point - configuration, dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use homelab_status::application::chart_service::ChartService;
use homelab_status::application::status_service::StatusService;
use homelab_status::infrastructure::config::load_site_config;
use homelab_status::infrastructure::influx_gateway::InfluxGateway;
use homelab_status::presentation::app_state::AppState;
use homelab_status::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = load_site_config()?;
    config.validate()?;

    let gateway = Arc::new(InfluxGateway::new(&config.influx));
    let chart_service = ChartService::new(gateway.clone(), config.influx.clone());
    let status_service =
        StatusService::new(gateway, config.influx.clone(), config.nodes.clone());

    let addr: SocketAddr = config.server.address.parse()?;
    let state = Arc::new(AppState {
        config,
        chart_service,
        status_service,
    });
    let router = build_router(state);

    tracing::info!("listening on {addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
