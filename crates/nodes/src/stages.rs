//! One function per pipeline node.
//!
//! Each stage reads what it needs from [`PipelineState`], does its work, and
//! records the result plus one trace entry. Transition checks live in the
//! state; stages only sequence calls.

use pipeline::{
    compose_response, CookwareMatcher, PipelineError, PipelineState, QueryCategory, RecipeStore,
    RetrievalPath, NON_COOKING_REFUSAL,
};
use tracing::info;

use crate::classifier::QueryClassifier;

/// Start → Classified.
pub async fn classify(
    classifier: &QueryClassifier,
    state: &mut PipelineState,
) -> Result<QueryCategory, PipelineError> {
    info!(query = %state.query(), "classifying query");
    let category = classifier.classify(state.query()).await;
    state.record_classification(category, format!("Query classified as: {category}"))?;
    Ok(category)
}

/// Classified → NonCookingHandled.
pub fn refuse(state: &mut PipelineState) -> Result<(), PipelineError> {
    info!("handling non-cooking query");
    state.record_refusal(
        NON_COOKING_REFUSAL,
        "Provided polite refusal for non-cooking query",
    )
}

/// Classified → RecipeRetrieved.
pub fn retrieve(recipes: &RecipeStore, state: &mut PipelineState) -> Result<(), PipelineError> {
    let path = RetrievalPath::for_query(state.query());
    let recipe = match path {
        RetrievalPath::IngredientSuggestion => recipes.suggest(state.query().as_str()),
        RetrievalPath::RecipeSearch => recipes.search(state.query().as_str()),
    };
    info!(reasoning = path.reasoning(), "retrieved recipe content");
    state.record_recipe(path, recipe)
}

/// RecipeRetrieved → CookwareValidated.
pub fn validate(matcher: &CookwareMatcher, state: &mut PipelineState) -> Result<(), PipelineError> {
    let (result, reasoning) = match state.recipe().filter(|recipe| !recipe.is_blank()) {
        Some(recipe) => {
            let result = matcher.match_recipe(recipe);
            let reasoning = format!("Cookware validation: {}", result.analysis());
            (result, reasoning)
        }
        None => (
            matcher.no_requirements(),
            "No recipe content to validate cookware against".to_string(),
        ),
    };
    info!(can_cook = result.can_cook(), "{reasoning}");
    state.record_cookware(result, reasoning)
}

/// CookwareValidated → ResponseComposed.
pub fn respond(state: &mut PipelineState) -> Result<(), PipelineError> {
    let composition = compose_response(state.recipe(), state.cookware());
    info!(reasoning = %composition.reasoning, "composed final response");
    state.record_response(composition.response, composition.reasoning)
}
