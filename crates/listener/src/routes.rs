//! Route handlers and router assembly.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use nodes::RecipeAgent;
use pipeline::Query;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::cors::{setup_cors, DEFAULT_ALLOWED_ORIGINS};
use crate::errors::{panic_response, ApiError};
use crate::models::{ChatRequest, ChatResponse, CookwareListing, HealthResponse};

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind_addr: SocketAddr,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// Upper bound on handling one request.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| (*origin).to_owned())
                .collect(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared handler state. Cloned per request; the agent itself is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    agent: Arc<RecipeAgent>,
}

impl AppState {
    /// Wraps `agent` for sharing across handlers.
    pub fn new(agent: RecipeAgent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}

/// Builds the application router with tracing, CORS, timeout, and
/// panic-recovery layers.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/chat", post(chat))
        .route("/cookware", get(list_cookware))
        .layer(catch_panic_layer())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(setup_cors(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Layer that answers a panicking handler with the generic 500 instead of
/// dropping the connection.
pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    let handler: fn(Box<dyn Any + Send + 'static>) -> Response = panic_response;
    CatchPanicLayer::custom(handler)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!(message_len = request.message.len(), "received chat request");
    debug!(message = %request.message, "chat request body");

    let outcome = state.agent.run(Query::new(request.message)).await?;

    info!(query_type = %outcome.category, "chat response generated");
    Ok(Json(ChatResponse::from(outcome)))
}

async fn list_cookware(State(state): State<AppState>) -> Json<CookwareListing> {
    Json(CookwareListing::from(state.agent.inventory()))
}
