//! Canned recipe lookup and ingredient-based suggestions.
//!
//! Both operations are substring matches over ordered tables, so the winner
//! is always deterministic: for [`RecipeStore::search`] the first dish key
//! defined in [`CANNED_RECIPES`] that appears in the query wins.

use crate::{CookwareInventory, RecipeContent};

const PANCAKES: &str = "Simple Pancakes Recipe:

Ingredients:
- 1 cup flour
- 1 egg
- 1 cup milk
- 2 tbsp sugar
- 1 tsp baking powder
- Pinch of salt

Instructions:
1. Mix dry ingredients in a bowl
2. Whisk wet ingredients separately
3. Combine wet and dry ingredients
4. Heat frying pan on stovetop
5. Pour batter and cook until bubbles form
6. Flip with spatula and cook other side

Equipment needed: Frying pan, stovetop, whisk, spatula";

const PASTA: &str = "Basic Pasta Recipe:

Ingredients:
- 200g pasta
- Salt
- Water
- Olive oil

Instructions:
1. Boil water in a pot with salt
2. Add pasta and cook according to package directions
3. Stir occasionally with spoon
4. Drain using ladle or strainer

Equipment needed: Little pot, stovetop, spoon, ladle";

const STIR_FRY: &str = "Vegetable Stir Fry Recipe:

Ingredients:
- Mixed vegetables
- Oil
- Soy sauce
- Garlic

Instructions:
1. Heat oil in frying pan on stovetop
2. Add chopped vegetables (use knife to chop)
3. Stir frequently with spatula
4. Add sauce and mix

Equipment needed: Frying pan, stovetop, knife, spatula";

/// Dish keys and their canned recipes. Definition order is the tie-break
/// order for queries that name several dishes.
pub const CANNED_RECIPES: &[(&str, &str)] = &[
    ("pancakes", PANCAKES),
    ("pasta", PASTA),
    ("stir fry", STIR_FRY),
];

/// Ingredient trigger groups and the suggestion each one produces, checked
/// in order. Groups are independent; several may match one query.
pub const INGREDIENT_SUGGESTIONS: &[(&[&str], &str)] = &[
    (
        &["egg", "flour", "milk"],
        "Pancakes - requires frying pan, stovetop, whisk, spatula",
    ),
    (
        &["pasta", "noodles"],
        "Pasta - requires little pot, stovetop, spoon, ladle",
    ),
    (
        &["vegetables", "veggies", "onion", "pepper"],
        "Vegetable Stir Fry - requires frying pan, stovetop, knife, spatula",
    ),
];

/// Heading placed above a non-empty suggestion list.
pub const SUGGESTION_HEADING: &str = "Based on your ingredients, you can make:";

/// Reply used when no ingredient group matches.
pub const ASK_FOR_INGREDIENTS: &str =
    "I'd be happy to suggest recipes! Could you tell me what specific ingredients you have available?";

// ---------------------------------------------------------------------------

/// Read-only store of canned recipes.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    recipes: &'static [(&'static str, &'static str)],
    suggestions: &'static [(&'static [&'static str], &'static str)],
    inventory: CookwareInventory,
}

impl RecipeStore {
    /// Store over the canned tables; `inventory` is quoted in the fallback
    /// reply.
    pub fn new(inventory: CookwareInventory) -> Self {
        Self {
            recipes: CANNED_RECIPES,
            suggestions: INGREDIENT_SUGGESTIONS,
            inventory,
        }
    }

    /// Dish keys in tie-break order.
    pub fn dishes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.recipes.iter().map(|(key, _)| *key)
    }

    /// Returns the first canned recipe whose key occurs in `query`
    /// (case-insensitive), or the fallback reply.
    pub fn search(&self, query: &str) -> RecipeContent {
        let query = query.to_lowercase();
        self.recipes
            .iter()
            .find(|(key, _)| query.contains(key))
            .map(|(_, recipe)| RecipeContent::new(*recipe))
            .unwrap_or_else(|| self.fallback())
    }

    /// Suggests dishes for the ingredients named in `ingredients`.
    pub fn suggest(&self, ingredients: &str) -> RecipeContent {
        let text = ingredients.to_lowercase();
        let matched: Vec<&str> = self
            .suggestions
            .iter()
            .filter(|(triggers, _)| triggers.iter().any(|t| text.contains(t)))
            .map(|(_, suggestion)| *suggestion)
            .collect();

        if matched.is_empty() {
            return RecipeContent::new(ASK_FOR_INGREDIENTS);
        }

        let mut reply = String::from(SUGGESTION_HEADING);
        for suggestion in matched {
            reply.push_str("\n• ");
            reply.push_str(suggestion);
        }
        RecipeContent::new(reply)
    }

    fn fallback(&self) -> RecipeContent {
        RecipeContent::new(format!(
            "I can help you with recipes! I have information about {} dishes.\n\
             You can also ask me \"What can I cook with [ingredients]?\" and I'll suggest \
             recipes based on your available cookware.\n\n\
             Your available cookware includes: {}",
            natural_list(&self.dishes().collect::<Vec<_>>()),
            self.inventory
        ))
    }
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new(CookwareInventory::standard())
    }
}

/// `["a"]` → `"a"`, `["a", "b"]` → `"a and b"`, `["a", "b", "c"]` → `"a, b, and c"`.
fn natural_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
