//! Request and response bodies of the HTTP API.

use pipeline::{CookwareInventory, CookwareName, PipelineOutcome, QueryCategory};
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question or ingredient list.
    pub message: String,
}

/// Reply of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text shown to the user.
    pub response: String,
    /// Classifier verdict; always present on success.
    pub query_type: Option<QueryCategory>,
    /// One entry per pipeline stage, in execution order.
    pub reasoning_chain: Vec<String>,
    /// Whether the recipe's cookware is all available. `None` when no
    /// cookware check ran.
    pub cookware_validated: Option<bool>,
}

impl From<PipelineOutcome> for ChatResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        Self {
            response: outcome.response,
            query_type: Some(outcome.category),
            reasoning_chain: outcome.trace,
            cookware_validated: outcome.cookware_validated,
        }
    }
}

/// Reply of `GET /cookware`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookwareListing {
    /// Inventory items in inventory order.
    pub available_cookware: Vec<String>,
    /// Number of items in `available_cookware`.
    pub count: usize,
}

impl From<&CookwareInventory> for CookwareListing {
    fn from(inventory: &CookwareInventory) -> Self {
        Self {
            available_cookware: inventory
                .items()
                .iter()
                .map(CookwareName::to_string)
                .collect(),
            count: inventory.len(),
        }
    }
}

/// Reply of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// Human-readable service description.
    pub message: String,
    /// Crate version of the running binary.
    pub version: String,
}

impl HealthResponse {
    /// Payload for a live service.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_owned(),
            message: "SousChef recipe assistant API is running".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
