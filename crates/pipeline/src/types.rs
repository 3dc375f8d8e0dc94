//! Shared value types for the SousChef pipeline domain.
//!
//! Unlike the identifiers in [`crate::identifiers`], these types carry values
//! that flow between stages: the user's query, the classifier's verdict, the
//! retrieved recipe, the cookware match, and the reasoning trace.

use serde::{Deserialize, Serialize};

use crate::{CookwareName, MatchResultError};

// ---------------------------------------------------------------------------
// Query and classification
// ---------------------------------------------------------------------------

/// The user's free-text input. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Wraps the raw message text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the query text as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lower-cased query text used for keyword matching.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// Two-valued verdict produced by the query classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    /// The query is about cooking, recipes, or food preparation.
    Cooking,
    /// Anything else, including every case where the oracle failed.
    NonCooking,
}

impl QueryCategory {
    /// Returns the wire name (`"cooking"` / `"non_cooking"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cooking => "cooking",
            Self::NonCooking => "non_cooking",
        }
    }
}

impl std::fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Recipe retrieval
// ---------------------------------------------------------------------------

/// A text blob describing a dish, or a suggestion list, or a fallback prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeContent(String);

impl RecipeContent {
    /// Wraps recipe text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the recipe text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the recipe carries no text besides whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for RecipeContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// Which recipe-store operation served a cooking query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalPath {
    /// The query listed ingredients; `RecipeStore::suggest` was used.
    IngredientSuggestion,
    /// The query named a dish; `RecipeStore::search` was used.
    RecipeSearch,
}

impl RetrievalPath {
    /// Phrases that route a query to ingredient-based suggestions.
    pub const SUGGESTION_MARKERS: &'static [&'static str] = &["what can i cook", "ingredients"];

    /// Chooses the retrieval path for a query.
    pub fn for_query(query: &Query) -> Self {
        let text = query.normalized();
        if Self::SUGGESTION_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
        {
            Self::IngredientSuggestion
        } else {
            Self::RecipeSearch
        }
    }

    /// Trace entry recorded when this path is taken.
    pub fn reasoning(self) -> &'static str {
        match self {
            Self::IngredientSuggestion => "Used ingredient-based recipe suggestions",
            Self::RecipeSearch => "Searched recipe database",
        }
    }
}

// ---------------------------------------------------------------------------
// Cookware matching
// ---------------------------------------------------------------------------

/// Outcome of matching a recipe's implied tools against the inventory.
///
/// Fields are private so the invariants hold by construction:
///
/// - `can_cook` is `true` exactly when `missing` is empty.
/// - `missing` holds the members of `required` that are not in `available`
///   (compared case-insensitively), in `required` order.
///
/// Deserialisation recomputes `missing` from `required` and `available` and
/// rejects payloads that disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CookwareMatchRecord")]
pub struct CookwareMatchResult {
    can_cook: bool,
    required: Vec<CookwareName>,
    available: Vec<CookwareName>,
    missing: Vec<CookwareName>,
    analysis: String,
}

impl CookwareMatchResult {
    /// Analysis text used when there is nothing to match against.
    pub const NO_REQUIREMENTS: &'static str = "No specific cookware requirements";

    /// Builds a result by diffing `required` against `available`.
    ///
    /// Duplicate entries in `required` collapse; first occurrence wins.
    pub fn from_requirements(required: Vec<CookwareName>, available: Vec<CookwareName>) -> Self {
        let mut unique: Vec<CookwareName> = Vec::with_capacity(required.len());
        for item in required {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }

        let missing: Vec<CookwareName> = unique
            .iter()
            .filter(|item| !available.contains(item))
            .cloned()
            .collect();

        let analysis = format!(
            "Recipe requires: {}. Missing: {}",
            join_or_none(&unique),
            join_or_none(&missing)
        );

        Self {
            can_cook: missing.is_empty(),
            required: unique,
            available,
            missing,
            analysis,
        }
    }

    /// Result for an absent or blank recipe: cookable, nothing required.
    pub fn no_requirements(available: Vec<CookwareName>) -> Self {
        Self {
            can_cook: true,
            required: Vec::new(),
            available,
            missing: Vec::new(),
            analysis: Self::NO_REQUIREMENTS.to_string(),
        }
    }

    /// Whether every required item is available.
    pub fn can_cook(&self) -> bool {
        self.can_cook
    }

    /// Items the recipe implies, in trigger-table order.
    pub fn required(&self) -> &[CookwareName] {
        &self.required
    }

    /// The inventory the recipe was matched against, in inventory order.
    pub fn available(&self) -> &[CookwareName] {
        &self.available
    }

    /// Required items that the inventory lacks.
    pub fn missing(&self) -> &[CookwareName] {
        &self.missing
    }

    /// One-line summary of required and missing items.
    pub fn analysis(&self) -> &str {
        &self.analysis
    }
}

/// Unchecked wire shape of [`CookwareMatchResult`].
#[derive(Deserialize)]
struct CookwareMatchRecord {
    can_cook: bool,
    required: Vec<CookwareName>,
    available: Vec<CookwareName>,
    missing: Vec<CookwareName>,
    analysis: String,
}

impl TryFrom<CookwareMatchRecord> for CookwareMatchResult {
    type Error = MatchResultError;

    fn try_from(record: CookwareMatchRecord) -> Result<Self, Self::Error> {
        for (i, item) in record.required.iter().enumerate() {
            if record.required[..i].contains(item) {
                return Err(MatchResultError::DuplicateRequirement {
                    item: item.to_string(),
                });
            }
        }

        let rebuilt = Self::from_requirements(record.required, record.available);
        if rebuilt.missing != record.missing {
            return Err(MatchResultError::MissingMismatch {
                expected: rebuilt.missing.iter().map(ToString::to_string).collect(),
                found: record.missing.iter().map(ToString::to_string).collect(),
            });
        }
        if rebuilt.can_cook != record.can_cook {
            return Err(MatchResultError::CanCookMismatch {
                can_cook: record.can_cook,
                missing: record.missing.len(),
            });
        }

        Ok(Self {
            analysis: record.analysis,
            ..rebuilt
        })
    }
}

/// Joins names with `", "`, or returns `"None"` when empty.
pub(crate) fn join_or_none(items: &[CookwareName]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        join_names(items)
    }
}

/// Joins names with `", "`.
pub(crate) fn join_names(items: &[CookwareName]) -> String {
    items
        .iter()
        .map(CookwareName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Reasoning trace
// ---------------------------------------------------------------------------

/// Ordered, append-only list of human-readable reasoning strings.
///
/// One entry is appended per pipeline stage. Entries are never reordered or
/// edited; the trace is purely diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineTrace(Vec<String>);

impl PipelineTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.0.push(entry.into());
    }

    /// Returns the entries in append order.
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no entry has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the trace, returning its entries.
    pub fn into_entries(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<CookwareName> {
        items
            .iter()
            .map(|s| CookwareName::new(*s).unwrap())
            .collect()
    }

    #[test]
    fn query_category_serialises_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&QueryCategory::Cooking).unwrap(),
            "\"cooking\""
        );
        assert_eq!(
            serde_json::to_string(&QueryCategory::NonCooking).unwrap(),
            "\"non_cooking\""
        );
        assert_eq!(QueryCategory::NonCooking.to_string(), "non_cooking");
    }

    #[test]
    fn retrieval_path_detects_ingredient_queries() {
        let cases = [
            ("What can I cook with eggs?", RetrievalPath::IngredientSuggestion),
            ("I have these INGREDIENTS: onion", RetrievalPath::IngredientSuggestion),
            ("Recipe for pasta", RetrievalPath::RecipeSearch),
            ("How do I make pancakes?", RetrievalPath::RecipeSearch),
        ];
        for (text, expected) in cases {
            assert_eq!(RetrievalPath::for_query(&Query::new(text)), expected, "{text}");
        }
    }

    #[test]
    fn match_result_reports_missing_items_case_insensitively() {
        let result = CookwareMatchResult::from_requirements(
            names(&["frying pan", "Wok", "Wok"]),
            names(&["Frying Pan", "Spoon"]),
        );

        assert!(!result.can_cook());
        assert_eq!(result.required().len(), 2);
        assert_eq!(result.missing(), names(&["Wok"]).as_slice());
        assert_eq!(result.analysis(), "Recipe requires: frying pan, Wok. Missing: Wok");
    }

    #[test]
    fn match_result_with_nothing_required_can_cook() {
        let result = CookwareMatchResult::from_requirements(Vec::new(), names(&["Spoon"]));
        assert!(result.can_cook());
        assert!(result.missing().is_empty());
        assert_eq!(result.analysis(), "Recipe requires: None. Missing: None");
    }

    #[test]
    fn no_requirements_result_is_fully_populated() {
        let result = CookwareMatchResult::no_requirements(names(&["Spoon"]));
        assert!(result.can_cook());
        assert!(result.required().is_empty());
        assert_eq!(result.available().len(), 1);
        assert_eq!(result.analysis(), CookwareMatchResult::NO_REQUIREMENTS);
    }

    #[test]
    fn deserialising_rejects_contradictory_match_results() {
        let err = serde_json::from_str::<CookwareMatchResult>(
            r#"{"can_cook":true,"required":[],"available":[],"missing":["Oven"],"analysis":"x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("do not match"), "{err}");

        let err = serde_json::from_str::<CookwareMatchResult>(
            r#"{"can_cook":true,"required":["Oven"],"available":["Spoon"],"missing":["Oven"],"analysis":"x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("can_cook is true"), "{err}");

        let err = serde_json::from_str::<CookwareMatchResult>(
            r#"{"can_cook":true,"required":["Spoon","spoon"],"available":["Spoon"],"missing":[],"analysis":"x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");
    }

    #[test]
    fn deserialising_accepts_serialised_results() {
        let original = CookwareMatchResult::from_requirements(
            names(&["Knife", "Oven"]),
            names(&["Knife", "Spoon"]),
        );
        let json = serde_json::to_string(&original).unwrap();
        let restored: CookwareMatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);

        let empty = CookwareMatchResult::no_requirements(names(&["Spoon"]));
        let json = serde_json::to_string(&empty).unwrap();
        let restored: CookwareMatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.analysis(), CookwareMatchResult::NO_REQUIREMENTS);
    }

    #[test]
    fn trace_preserves_append_order() {
        let mut trace = PipelineTrace::new();
        assert!(trace.is_empty());
        trace.push("first");
        trace.push(String::from("second"));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.into_entries(), vec!["first", "second"]);
    }
}
