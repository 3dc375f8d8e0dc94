//! Error types for the SousChef pipeline domain.
//!
//! [`PipelineError`] covers conditions that abort a single request's pipeline
//! run. [`OracleError`] covers failures of the external classification oracle;
//! those never escape the classifier, which resolves them to
//! [`crate::QueryCategory::NonCooking`].
//!
//! No error in this crate is retried. Every failure is terminal for the
//! current request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::PipelineStage;

// ---------------------------------------------------------------------------
// Pipeline-level errors
// ---------------------------------------------------------------------------

/// Errors that abort one pipeline run.
///
/// These represent internal faults rather than user-facing soft failures. The
/// HTTP layer turns every variant into a generic service error and logs the
/// detail; none of the text here is shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PipelineError {
    /// A stage tried to move the pipeline along an edge that does not exist.
    ///
    /// Produced by [`crate::PipelineState`] when a stage runs twice or out of
    /// order.
    #[error("Invalid pipeline transition: {from} -> {to}")]
    InvalidTransition {
        /// Stage the pipeline was in.
        from: PipelineStage,
        /// Stage that was requested.
        to: PipelineStage,
    },

    /// The pipeline was finished before it reached a terminal stage or before
    /// a final response was recorded.
    #[error("Pipeline finished incomplete at stage {stage}")]
    Incomplete {
        /// Stage the pipeline was in when `finish` was called.
        stage: PipelineStage,
    },
}

// ---------------------------------------------------------------------------
// Oracle errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::ClassificationOracle`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// No credentials were configured for the oracle endpoint.
    #[error("Classification oracle is not configured")]
    NotConfigured,

    /// The oracle endpoint could not be reached or did not answer in time.
    #[error("Classification oracle unavailable: {message}")]
    Unavailable {
        /// Transport-level description of the failure.
        message: String,
    },

    /// The oracle answered with a non-success status.
    #[error("Classification oracle rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The oracle answered but the body could not be interpreted.
    #[error("Classification oracle returned a malformed response: {message}")]
    MalformedResponse {
        /// Description of what was wrong with the body.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Cookware match errors
// ---------------------------------------------------------------------------

/// Rejections raised when a [`crate::CookwareMatchResult`] is rebuilt from
/// its serialised form and the fields contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchResultError {
    /// An item appears more than once in `required`.
    #[error("Cookware item '{item}' is required more than once")]
    DuplicateRequirement {
        /// The repeated item name.
        item: String,
    },

    /// `missing` is not the list of required items absent from `available`.
    #[error("Missing items {found:?} do not match the required items absent from the inventory {expected:?}")]
    MissingMismatch {
        /// Required items that the inventory lacks.
        expected: Vec<String>,
        /// Items listed as missing.
        found: Vec<String>,
    },

    /// `can_cook` disagrees with whether anything is missing.
    #[error("can_cook is {can_cook} but {missing} items are missing")]
    CanCookMismatch {
        /// Flag carried by the payload.
        can_cook: bool,
        /// Number of missing items.
        missing: usize,
    },
}
