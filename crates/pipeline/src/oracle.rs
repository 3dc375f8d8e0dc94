//! Port for the external text-classification oracle.
//!
//! The oracle is a black box: prompt in, free text out. Implementations live
//! in infrastructure crates (see the `llm` crate); tests substitute
//! deterministic stubs.

use async_trait::async_trait;

use crate::OracleError;

/// A text-in/text-out classification capability.
///
/// Implementations must be shareable across concurrent requests. They are not
/// expected to be deterministic, and callers must bound every call with a
/// timeout.
#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    /// Sends `prompt` to the oracle and returns its raw text output.
    async fn classify(&self, prompt: &str) -> Result<String, OracleError>;
}
