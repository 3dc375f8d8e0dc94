//! Per-request pipeline state machine.
//!
//! ```text
//! Start -> Classified -> NonCookingHandled ----------------------------> Done
//!                     \-> RecipeRetrieved -> CookwareValidated -> ResponseComposed -> Done
//! ```
//!
//! [`PipelineState`] is created once per request, owned by the executor, and
//! consumed by [`PipelineState::finish`]. Every `record_*` method checks the
//! transition first, so a stage cannot run twice or out of order.

use serde::{Deserialize, Serialize};

use crate::{
    CookwareMatchResult, PipelineError, PipelineRunId, PipelineTrace, Query, QueryCategory,
    RecipeContent, RetrievalPath,
};

/// Node of the pipeline graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Query received; nothing has run yet.
    Start,
    /// The classifier recorded a category.
    Classified,
    /// A non-cooking query received the fixed refusal.
    NonCookingHandled,
    /// A recipe was fetched by search or suggestion.
    RecipeRetrieved,
    /// The recipe was matched against the inventory.
    CookwareValidated,
    /// The final reply for a cooking query was composed.
    ResponseComposed,
    /// Terminal. The outcome may be taken.
    Done,
}

impl PipelineStage {
    /// Returns `true` if `next` is a direct successor of `self`.
    ///
    /// Category guards on the `Classified` edges are checked by
    /// [`PipelineState`], not here.
    pub fn can_transition_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        matches!(
            (self, next),
            (Start, Classified)
                | (Classified, NonCookingHandled)
                | (Classified, RecipeRetrieved)
                | (RecipeRetrieved, CookwareValidated)
                | (CookwareValidated, ResponseComposed)
                | (NonCookingHandled, Done)
                | (ResponseComposed, Done)
        )
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Classified => "classified",
            Self::NonCookingHandled => "non_cooking_handled",
            Self::RecipeRetrieved => "recipe_retrieved",
            Self::CookwareValidated => "cookware_validated",
            Self::ResponseComposed => "response_composed",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------

/// Mutable working record for one request.
#[derive(Debug, Clone)]
pub struct PipelineState {
    run_id: PipelineRunId,
    query: Query,
    stage: PipelineStage,
    category: Option<QueryCategory>,
    retrieval: Option<RetrievalPath>,
    recipe: Option<RecipeContent>,
    cookware: Option<CookwareMatchResult>,
    final_response: Option<String>,
    trace: PipelineTrace,
}

impl PipelineState {
    /// Fresh state in [`PipelineStage::Start`] with a random run id.
    pub fn new(query: Query) -> Self {
        Self::with_run_id(PipelineRunId::new_random(), query)
    }

    /// Fresh state with a caller-supplied run id.
    pub fn with_run_id(run_id: PipelineRunId, query: Query) -> Self {
        Self {
            run_id,
            query,
            stage: PipelineStage::Start,
            category: None,
            retrieval: None,
            recipe: None,
            cookware: None,
            final_response: None,
            trace: PipelineTrace::new(),
        }
    }

    /// Identifier of this run, recorded on its tracing span.
    pub fn run_id(&self) -> PipelineRunId {
        self.run_id
    }

    /// The query being answered.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Current node of the pipeline graph.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Classifier verdict, once classified.
    pub fn category(&self) -> Option<QueryCategory> {
        self.category
    }

    /// How the recipe was retrieved, once retrieved.
    pub fn retrieval(&self) -> Option<RetrievalPath> {
        self.retrieval
    }

    /// Retrieved recipe text, if any.
    pub fn recipe(&self) -> Option<&RecipeContent> {
        self.recipe.as_ref()
    }

    /// Cookware match, once validated.
    pub fn cookware(&self) -> Option<&CookwareMatchResult> {
        self.cookware.as_ref()
    }

    /// Reply text, once composed or refused.
    pub fn final_response(&self) -> Option<&str> {
        self.final_response.as_deref()
    }

    /// Reasoning entries recorded so far.
    pub fn trace(&self) -> &PipelineTrace {
        &self.trace
    }

    /// Start → Classified.
    pub fn record_classification(
        &mut self,
        category: QueryCategory,
        reasoning: impl Into<String>,
    ) -> Result<(), PipelineError> {
        self.advance(PipelineStage::Classified)?;
        self.category = Some(category);
        self.trace.push(reasoning);
        Ok(())
    }

    /// Classified → NonCookingHandled. Only valid for non-cooking queries.
    pub fn record_refusal(
        &mut self,
        response: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Result<(), PipelineError> {
        self.guard_category(QueryCategory::NonCooking, PipelineStage::NonCookingHandled)?;
        self.advance(PipelineStage::NonCookingHandled)?;
        self.final_response = Some(response.into());
        self.trace.push(reasoning);
        Ok(())
    }

    /// Classified → RecipeRetrieved. Only valid for cooking queries.
    pub fn record_recipe(
        &mut self,
        path: RetrievalPath,
        recipe: RecipeContent,
    ) -> Result<(), PipelineError> {
        self.guard_category(QueryCategory::Cooking, PipelineStage::RecipeRetrieved)?;
        self.advance(PipelineStage::RecipeRetrieved)?;
        self.retrieval = Some(path);
        self.recipe = Some(recipe);
        self.trace.push(path.reasoning());
        Ok(())
    }

    /// RecipeRetrieved → CookwareValidated.
    pub fn record_cookware(
        &mut self,
        result: CookwareMatchResult,
        reasoning: impl Into<String>,
    ) -> Result<(), PipelineError> {
        self.advance(PipelineStage::CookwareValidated)?;
        self.cookware = Some(result);
        self.trace.push(reasoning);
        Ok(())
    }

    /// CookwareValidated → ResponseComposed.
    pub fn record_response(
        &mut self,
        response: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Result<(), PipelineError> {
        self.advance(PipelineStage::ResponseComposed)?;
        self.final_response = Some(response.into());
        self.trace.push(reasoning);
        Ok(())
    }

    /// Moves to [`PipelineStage::Done`] and hands back the outcome.
    pub fn finish(mut self) -> Result<PipelineOutcome, PipelineError> {
        let incomplete = PipelineError::Incomplete { stage: self.stage };
        self.advance(PipelineStage::Done)
            .map_err(|_| incomplete.clone())?;

        let (Some(response), Some(category)) = (self.final_response, self.category) else {
            return Err(incomplete);
        };

        Ok(PipelineOutcome {
            run_id: self.run_id,
            response,
            category,
            trace: self.trace.into_entries(),
            cookware_validated: self.cookware.as_ref().map(CookwareMatchResult::can_cook),
            recipe: self.recipe,
        })
    }

    fn advance(&mut self, next: PipelineStage) -> Result<(), PipelineError> {
        if !self.stage.can_transition_to(next) {
            return Err(PipelineError::InvalidTransition {
                from: self.stage,
                to: next,
            });
        }
        self.stage = next;
        Ok(())
    }

    fn guard_category(
        &self,
        expected: QueryCategory,
        next: PipelineStage,
    ) -> Result<(), PipelineError> {
        if self.category == Some(expected) {
            Ok(())
        } else {
            Err(PipelineError::InvalidTransition {
                from: self.stage,
                to: next,
            })
        }
    }
}

// ---------------------------------------------------------------------------

/// Terminal value of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Correlates the outcome with the run's log lines.
    pub run_id: PipelineRunId,
    /// Final user-facing response.
    pub response: String,
    /// The classifier's verdict.
    pub category: QueryCategory,
    /// Reasoning entries, one per stage executed.
    pub trace: Vec<String>,
    /// `Some(can_cook)` when cookware validation ran, `None` otherwise.
    pub cookware_validated: Option<bool>,
    /// Retrieved recipe text, when retrieval ran.
    pub recipe: Option<RecipeContent>,
}
