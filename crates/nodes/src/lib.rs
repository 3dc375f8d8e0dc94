//! SousChef pipeline stages, query classifier, and executor.
//!
//! This crate provides the classification prompt, the timeout-bounded
//! [`QueryClassifier`], one function per pipeline node, and the
//! [`RecipeAgent`] that drives a request from `Start` to `Done`.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Stages sequence calls between business logic in
//! the [`pipeline`] crate and the injected [`pipeline::ClassificationOracle`].
//! They contain no domain rules of their own.

pub mod classifier;
pub mod executor;
pub mod prompts;
pub mod stages;

#[cfg(test)]
mod testing;

pub use classifier::{parse_verdict, QueryClassifier, COOKING_MARKER, DEFAULT_ORACLE_TIMEOUT};
pub use executor::RecipeAgent;
pub use prompts::{classification_prompt, CLASSIFICATION_TEMPLATE};
