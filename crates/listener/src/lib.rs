//! SousChef HTTP API.
//!
//! Exposes the [`nodes::RecipeAgent`] over three endpoints:
//!
//! | Method | Path | Reply |
//! |--------|------|-------|
//! | `GET` | `/` | [`HealthResponse`] liveness payload |
//! | `POST` | `/chat` | [`ChatResponse`] for a [`ChatRequest`] |
//! | `GET` | `/cookware` | [`CookwareListing`] of the inventory |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Routing, CORS, request tracing, timeouts, and panic
//! recovery live here.
//! Every request gets its own pipeline run; handlers share only the
//! read-only agent.

pub mod cors;
pub mod errors;
pub mod models;
pub mod routes;

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

pub use errors::{panic_response, ApiError, INTERNAL_ERROR_DETAIL};
pub use models::{ChatRequest, ChatResponse, CookwareListing, HealthResponse};
pub use routes::{catch_panic_layer, router, AppState, ServerConfig};

/// Binds `config.bind_addr` and serves `app` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error if binding or accepting fails.
pub async fn serve<F>(config: &ServerConfig, app: axum::Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
