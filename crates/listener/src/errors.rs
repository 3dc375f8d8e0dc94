//! HTTP error mapping.
//!
//! Internal faults become a generic 500. The detail is logged, never returned.
//! Handler panics are caught by the router and answered the same way.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipeline::PipelineError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Body text returned for every internal fault.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The pipeline aborted on an internal fault.
    #[error("Pipeline failed: {0}")]
    Pipeline(#[from] PipelineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed with internal error");
        internal_error()
    }
}

/// Turns a caught handler panic into the generic 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    error!(panic = message, "request handler panicked");
    internal_error()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": INTERNAL_ERROR_DETAIL })),
    )
        .into_response()
}
