//! Cookware matching: infer required tools from recipe text and diff them
//! against the inventory.
//!
//! Requirements are inferred by substring search over a fixed, ordered table
//! of trigger keywords. With [`COOKWARE_TRIGGERS`] every key is itself an
//! inventory item, so the standard matcher never reports missing cookware.
//! A custom table passed to [`CookwareMatcher::with_triggers`] may name tools
//! outside the inventory; those show up as missing.

use tracing::debug;

use crate::{CookwareInventory, CookwareMatchResult, CookwareName, RecipeContent};

/// Trigger keywords per cookware item, in match order.
///
/// Table order decides the order of `required` in the match result.
pub const COOKWARE_TRIGGERS: &[(&str, &[&str])] = &[
    ("Frying Pan", &["fry", "sauté", "pan-fry", "frying pan"]),
    ("Little Pot", &["boil", "simmer", "pot", "saucepan"]),
    ("Stovetop", &["cook", "heat", "boil", "fry", "simmer"]),
    ("Knife", &["chop", "dice", "cut", "slice", "mince"]),
    ("Spatula", &["flip", "turn", "spatula"]),
    ("Whisk", &["whisk", "beat", "mix thoroughly"]),
    ("Ladle", &["ladle", "serve soup"]),
    ("Spoon", &["stir", "mix", "spoon"]),
];

/// One row of the trigger table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerGroup {
    item: CookwareName,
    keywords: Vec<String>,
}

impl TriggerGroup {
    /// Creates a trigger group. Keywords are lower-cased; blank keywords are
    /// dropped. Returns `None` if `item` is blank.
    pub fn new<I, S>(item: impl Into<String>, keywords: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let item = CookwareName::new(item)?;
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.trim().is_empty())
            .collect();
        Some(Self { item, keywords })
    }

    /// The cookware this group implies.
    pub fn item(&self) -> &CookwareName {
        &self.item
    }

    fn is_triggered_by(&self, normalized_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_text.contains(keyword.as_str()))
    }
}

/// Builds the standard trigger table from [`COOKWARE_TRIGGERS`].
pub fn standard_triggers() -> Vec<TriggerGroup> {
    COOKWARE_TRIGGERS
        .iter()
        .filter_map(|(item, keywords)| TriggerGroup::new(*item, keywords.iter()))
        .collect()
}

// ---------------------------------------------------------------------------

/// Matches recipe text against an inventory using a trigger table.
#[derive(Debug, Clone)]
pub struct CookwareMatcher {
    inventory: CookwareInventory,
    triggers: Vec<TriggerGroup>,
}

impl CookwareMatcher {
    /// Matcher over `inventory` with the standard trigger table.
    pub fn new(inventory: CookwareInventory) -> Self {
        Self::with_triggers(inventory, standard_triggers())
    }

    /// Matcher over `inventory` with a custom trigger table.
    pub fn with_triggers(inventory: CookwareInventory, triggers: Vec<TriggerGroup>) -> Self {
        Self {
            inventory,
            triggers,
        }
    }

    /// The inventory this matcher diffs against.
    pub fn inventory(&self) -> &CookwareInventory {
        &self.inventory
    }

    /// Infers required cookware from `recipe` and reports what is missing.
    ///
    /// A blank recipe yields [`CookwareMatchResult::no_requirements`].
    pub fn match_recipe(&self, recipe: &RecipeContent) -> CookwareMatchResult {
        if recipe.is_blank() {
            return self.no_requirements();
        }

        let text = recipe.as_str().to_lowercase();
        let required: Vec<CookwareName> = self
            .triggers
            .iter()
            .filter(|group| group.is_triggered_by(&text))
            .map(|group| group.item.clone())
            .collect();

        let result =
            CookwareMatchResult::from_requirements(required, self.inventory.items().to_vec());
        debug!(
            required = result.required().len(),
            missing = result.missing().len(),
            "matched recipe against cookware inventory"
        );
        result
    }

    /// Result used when there is no recipe to match.
    pub fn no_requirements(&self) -> CookwareMatchResult {
        CookwareMatchResult::no_requirements(self.inventory.items().to_vec())
    }
}

impl Default for CookwareMatcher {
    fn default() -> Self {
        Self::new(CookwareInventory::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(text: &str) -> RecipeContent {
        RecipeContent::new(text)
    }

    fn required_names(result: &CookwareMatchResult) -> Vec<&str> {
        result.required().iter().map(CookwareName::as_str).collect()
    }

    #[test]
    fn blank_recipe_yields_default_result() {
        let result = CookwareMatcher::default().match_recipe(&recipe("  \n "));
        assert!(result.can_cook());
        assert_eq!(result.analysis(), CookwareMatchResult::NO_REQUIREMENTS);
        assert_eq!(result.available().len(), 8);
    }

    #[test]
    fn triggers_match_case_insensitively_in_table_order() {
        let result = CookwareMatcher::default().match_recipe(&recipe("WHISK the eggs, then FRY."));
        assert_eq!(required_names(&result), vec!["Frying Pan", "Stovetop", "Whisk"]);
        assert!(result.can_cook());
        assert_eq!(
            result.analysis(),
            "Recipe requires: Frying Pan, Stovetop, Whisk. Missing: None"
        );
    }

    #[test]
    fn shared_keywords_require_every_matching_item_once() {
        // "boil" triggers both Little Pot and Stovetop.
        let result = CookwareMatcher::default().match_recipe(&recipe("Boil, boil, boil."));
        assert_eq!(required_names(&result), vec!["Little Pot", "Stovetop"]);
    }

    #[test]
    fn accented_triggers_are_recognised() {
        let result = CookwareMatcher::default().match_recipe(&recipe("SAUTÉ the onions"));
        assert!(required_names(&result).contains(&"Frying Pan"));
    }

    #[test]
    fn standard_table_is_closed_over_the_inventory() {
        let matcher = CookwareMatcher::default();
        let everything: String = COOKWARE_TRIGGERS
            .iter()
            .flat_map(|(_, keywords)| keywords.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        let result = matcher.match_recipe(&recipe(&everything));

        assert_eq!(result.required().len(), COOKWARE_TRIGGERS.len());
        assert!(result.missing().is_empty());
        for group in standard_triggers() {
            assert!(matcher.inventory().contains(group.item()), "{}", group.item());
        }
    }

    #[test]
    fn custom_table_reports_tools_outside_the_inventory() {
        let mut triggers = standard_triggers();
        triggers.push(TriggerGroup::new("Oven", ["bake", "roast"]).unwrap());
        let matcher = CookwareMatcher::with_triggers(CookwareInventory::standard(), triggers);

        let result = matcher.match_recipe(&recipe("Roast the vegetables, then stir."));
        assert!(!result.can_cook());
        assert_eq!(required_names(&result), vec!["Spoon", "Oven"]);
        assert_eq!(result.missing().len(), 1);
        assert_eq!(result.missing()[0].as_str(), "Oven");
    }
}
