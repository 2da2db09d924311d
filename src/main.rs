use std::sync::Arc;

use matchmaker::config::Configuration;
use matchmaker::{app, initialize_state, telemetry};
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

const DEFAULT_FILTER: &str = "matchmaker=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let config = Configuration::default()
        .path(std::env::var("CONFIG_PATH").unwrap_or_default())
        .read();
    let otlp_endpoint = config
        .as_ref()
        .ok()
        .and_then(|c| c.telemetry.otlp_endpoint.clone());

    // Export logs and spans when a collector is configured.
    let otlp_logs = otlp_endpoint
        .as_deref()
        .map(telemetry::setup_logging)
        .transpose()?;
    if let Some(endpoint) = otlp_endpoint.as_deref() {
        opentelemetry::global::set_tracer_provider(telemetry::setup_tracer(
            endpoint,
        )?);
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(fmt::layer())
        .with(otlp_logs)
        .init();

    let config = Arc::new(match config {
        Ok(config) => config,
        Err(err) if err.is_missing() => {
            tracing::warn!(error = %err, "no configuration file, using defaults");
            Configuration::default()
        },
        Err(err) => {
            tracing::error!(error = %err, "cannot load configuration");
            return Err(err.into());
        },
    });

    let metrics = if config.telemetry.metrics {
        Some(telemetry::setup_metrics_recorder()?)
    } else {
        None
    };

    let state = initialize_state(Arc::clone(&config), metrics).await?;

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "server started");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}
