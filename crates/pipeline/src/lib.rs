//! Core domain for the SousChef recipe assistant.
//!
//! This crate contains every domain concept, keyword table, and piece of
//! business logic used by the pipeline, plus the [`ClassificationOracle`]
//! port. Infrastructure crates implement the port; they never add domain
//! rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | `PipelineRunId`, case-insensitive `CookwareName` |
//! | [`types`] | Value types (`Query`, `QueryCategory`, `CookwareMatchResult`, `PipelineTrace`, etc.) |
//! | [`errors`] | `PipelineError`, `OracleError`, `MatchResultError` |
//! | [`inventory`] | The fixed cookware inventory |
//! | [`cookware`] | Trigger table and `CookwareMatcher` |
//! | [`recipes`] | Canned recipes and ingredient suggestions |
//! | [`compose`] | Final response composition |
//! | [`state`] | Per-request state machine and `PipelineOutcome` |
//! | [`oracle`] | The `ClassificationOracle` port |

pub mod compose;
pub mod cookware;
pub mod errors;
pub mod identifiers;
pub mod inventory;
pub mod oracle;
pub mod recipes;
pub mod state;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use compose::{
    compose_response, Composition, COMPOSITION_FAILURE, COOKWARE_CONFIRMED, NON_COOKING_REFUSAL,
};
pub use cookware::{standard_triggers, CookwareMatcher, TriggerGroup, COOKWARE_TRIGGERS};
pub use errors::{MatchResultError, OracleError, PipelineError};
pub use identifiers::{CookwareName, PipelineRunId};
pub use inventory::{CookwareInventory, AVAILABLE_COOKWARE};
pub use oracle::ClassificationOracle;
pub use recipes::{RecipeStore, CANNED_RECIPES, INGREDIENT_SUGGESTIONS};
pub use state::{PipelineOutcome, PipelineStage, PipelineState};
pub use types::{
    CookwareMatchResult, PipelineTrace, Query, QueryCategory, RecipeContent, RetrievalPath,
};
