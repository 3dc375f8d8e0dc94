//! The `RecipeAgent`: drives one request through the pipeline graph.

use std::sync::Arc;
use std::time::Duration;

use pipeline::{
    ClassificationOracle, CookwareInventory, CookwareMatcher, PipelineError, PipelineOutcome,
    PipelineState, Query, QueryCategory, RecipeStore,
};
use tracing::{error, info, info_span, Instrument};

use crate::classifier::QueryClassifier;
use crate::stages;

/// Sequences classification, retrieval, validation, and composition.
///
/// Holds only read-only tables and the classifier, so one agent is shared
/// (behind an `Arc`) by every in-flight request. Each call to
/// [`RecipeAgent::run`] owns its own [`PipelineState`].
#[derive(Debug, Clone)]
pub struct RecipeAgent {
    classifier: QueryClassifier,
    recipes: RecipeStore,
    matcher: CookwareMatcher,
}

impl RecipeAgent {
    /// Agent from explicit parts.
    pub fn new(classifier: QueryClassifier, recipes: RecipeStore, matcher: CookwareMatcher) -> Self {
        Self {
            classifier,
            recipes,
            matcher,
        }
    }

    /// Agent over the standard inventory, trigger table, and recipes.
    pub fn standard(oracle: Arc<dyn ClassificationOracle>, oracle_timeout: Duration) -> Self {
        let inventory = CookwareInventory::standard();
        Self::new(
            QueryClassifier::with_timeout(oracle, oracle_timeout),
            RecipeStore::new(inventory.clone()),
            CookwareMatcher::new(inventory),
        )
    }

    /// The inventory cookware is validated against.
    pub fn inventory(&self) -> &CookwareInventory {
        self.matcher.inventory()
    }

    /// Runs the full pipeline for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] only for internal faults (a stage executed
    /// out of order). Oracle failures and missing intermediate results are
    /// resolved inside the pipeline and never surface here.
    pub async fn run(&self, query: Query) -> Result<PipelineOutcome, PipelineError> {
        let state = PipelineState::new(query);
        let span = info_span!("pipeline_run", run_id = %state.run_id());
        self.drive(state).instrument(span).await
    }

    async fn drive(&self, mut state: PipelineState) -> Result<PipelineOutcome, PipelineError> {
        if let Err(e) = self.execute(&mut state).await {
            error!(error = %e, stage = %state.stage(), "pipeline aborted");
            return Err(e);
        }

        let outcome = state.finish()?;
        info!(
            category = %outcome.category,
            cookware_validated = ?outcome.cookware_validated,
            trace_len = outcome.trace.len(),
            "pipeline finished"
        );
        Ok(outcome)
    }

    async fn execute(&self, state: &mut PipelineState) -> Result<(), PipelineError> {
        match stages::classify(&self.classifier, state).await? {
            QueryCategory::NonCooking => stages::refuse(state),
            QueryCategory::Cooking => {
                stages::retrieve(&self.recipes, state)?;
                stages::validate(&self.matcher, state)?;
                stages::respond(state)
            }
        }
    }
}
