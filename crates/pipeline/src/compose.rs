//! Final response composition.
//!
//! The branch is decided by [`CookwareMatchResult::can_cook`] alone, and both
//! branches start with the recipe text verbatim.

use tracing::warn;

use crate::types::join_names;
use crate::{CookwareMatchResult, RecipeContent};

/// Reply used when composition runs without a recipe or a cookware result.
pub const COMPOSITION_FAILURE: &str =
    "I encountered an issue processing your request. Please try again.";

/// Reply for queries classified as non-cooking.
pub const NON_COOKING_REFUSAL: &str = "I'm a cooking assistant specialized in recipes and food preparation. I can help you with cooking questions, recipe suggestions, and checking if you have the right cookware for dishes. Is there anything cooking-related I can help you with?";

/// Annotation appended when every required item is available.
pub const COOKWARE_CONFIRMED: &str =
    "✅ Good news! You have all the required cookware to make this recipe.";

/// Composed reply plus the reasoning entry describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// User-facing response text.
    pub response: String,
    /// Trace entry for the composition stage.
    pub reasoning: String,
}

/// Merges the recipe and cookware result into the user-facing reply.
///
/// Never fails: when either input is absent the fixed
/// [`COMPOSITION_FAILURE`] reply is returned and the gap is logged.
pub fn compose_response(
    recipe: Option<&RecipeContent>,
    cookware: Option<&CookwareMatchResult>,
) -> Composition {
    let (Some(recipe), Some(cookware)) = (recipe, cookware) else {
        warn!(
            has_recipe = recipe.is_some(),
            has_cookware = cookware.is_some(),
            "composition reached without recipe or cookware result"
        );
        return Composition {
            response: COMPOSITION_FAILURE.to_string(),
            reasoning: "Error in recipe processing pipeline".to_string(),
        };
    };

    if cookware.can_cook() {
        Composition {
            response: format!("{recipe}\n\n{COOKWARE_CONFIRMED}"),
            reasoning: "Generated positive response with recipe and cookware confirmation"
                .to_string(),
        }
    } else {
        let missing = join_names(cookware.missing());
        Composition {
            response: format!(
                "{recipe}\n\n❌ You're missing some cookware: {missing}\n\n\
                 You might want to find alternatives or consider a different recipe that uses \
                 your available equipment: {}",
                join_names(cookware.available())
            ),
            reasoning: format!("Generated response noting missing cookware: {missing}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CookwareInventory, CookwareMatcher, CookwareName, TriggerGroup};

    fn matcher_with_oven() -> CookwareMatcher {
        let mut triggers = crate::cookware::standard_triggers();
        triggers.push(TriggerGroup::new("Oven", ["bake"]).unwrap());
        CookwareMatcher::with_triggers(CookwareInventory::standard(), triggers)
    }

    #[test]
    fn missing_inputs_yield_fixed_apology() {
        let recipe = RecipeContent::new("Toast");
        let cookware = CookwareMatchResult::no_requirements(Vec::new());

        for composition in [
            compose_response(None, None),
            compose_response(Some(&recipe), None),
            compose_response(None, Some(&cookware)),
        ] {
            assert_eq!(composition.response, COMPOSITION_FAILURE);
            assert_eq!(composition.reasoning, "Error in recipe processing pipeline");
        }
    }

    #[test]
    fn cookable_recipe_gets_success_annotation() {
        let recipe = RecipeContent::new("Stir the soup.");
        let cookware = CookwareMatcher::default().match_recipe(&recipe);
        let composition = compose_response(Some(&recipe), Some(&cookware));

        assert!(composition.response.starts_with("Stir the soup."));
        assert!(composition.response.ends_with(COOKWARE_CONFIRMED));
        assert!(!composition.response.contains('❌'));
    }

    #[test]
    fn missing_cookware_is_listed_with_alternatives() {
        let recipe = RecipeContent::new("Bake the bread.");
        let cookware = matcher_with_oven().match_recipe(&recipe);
        let composition = compose_response(Some(&recipe), Some(&cookware));

        assert!(composition.response.starts_with("Bake the bread.\n\n❌"));
        assert!(composition
            .response
            .contains("You're missing some cookware: Oven"));
        assert!(composition.response.ends_with(
            "your available equipment: Spatula, Frying Pan, Little Pot, Stovetop, Whisk, Knife, Ladle, Spoon"
        ));
        assert_eq!(
            composition.reasoning,
            "Generated response noting missing cookware: Oven"
        );
    }

    #[test]
    fn branch_follows_can_cook_only() {
        let recipe = RecipeContent::new("anything");
        let oven = CookwareName::new("Oven").unwrap();
        let cannot = CookwareMatchResult::from_requirements(vec![oven.clone()], Vec::new());
        let can = CookwareMatchResult::from_requirements(vec![oven.clone()], vec![oven]);

        assert!(compose_response(Some(&recipe), Some(&cannot))
            .response
            .contains("❌"));
        assert!(compose_response(Some(&recipe), Some(&can))
            .response
            .contains("✅"));
    }
}
