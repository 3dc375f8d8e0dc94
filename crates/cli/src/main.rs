//! SousChef entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — flags and environment variables via `clap`.
//! 2. **Wire observability** — `tracing-subscriber` with a JSON or pretty
//!    layer and, when an endpoint is configured, an OpenTelemetry OTLP
//!    exporter. All spans and events from every crate flow through it.
//! 3. **Construct infrastructure** — the `OpenAiProvider` oracle, injected
//!    into the `RecipeAgent`.
//! 4. **Serve** — bind the HTTP API and run until Ctrl-C or SIGTERM.

mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use listener::AppState;
use llm::OpenAiProvider;
use nodes::RecipeAgent;
use tracing::{info, warn};

use crate::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::parse();
    config.validate().context("invalid configuration")?;
    let _telemetry = telemetry::init(config.log_format, config.otlp_endpoint.as_deref())?;

    let oracle_config = config.oracle_config();
    if !oracle_config.has_credentials() {
        warn!("OPENAI_API_KEY is not set; every query will be classified as non-cooking");
    }
    info!(
        model = %oracle_config.model,
        base_url = %oracle_config.base_url,
        "configured classification oracle"
    );
    let oracle = OpenAiProvider::new(oracle_config).context("failed to build LLM provider")?;

    let agent = RecipeAgent::standard(Arc::new(oracle), config.classifier_timeout());
    let server_config = config.server_config();
    let app = listener::router(AppState::new(agent), &server_config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %server_config.bind_addr,
        "SousChef starting"
    );
    listener::serve(&server_config, app, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("SousChef stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
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
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
