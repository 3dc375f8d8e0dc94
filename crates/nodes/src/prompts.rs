//! Prompt templates sent to the classification oracle.

use pipeline::Query;

/// Placeholder replaced with the user's query.
const QUERY_PLACEHOLDER: &str = "{query}";

/// Instruction plus few-shot examples biasing the oracle toward a binary
/// `COOKING` / `NON_COOKING` verdict.
pub const CLASSIFICATION_TEMPLATE: &str = "You are a cooking assistant. Determine if the following query is related to cooking, recipes, or food preparation.

Query: {query}

Respond with only 'COOKING' if it's cooking-related, or 'NON_COOKING' if it's not.

Examples:
- \"How do I make pancakes?\" -> COOKING
- \"What can I cook with chicken?\" -> COOKING
- \"Recipe for pasta\" -> COOKING
- \"What's the weather like?\" -> NON_COOKING
- \"How do I fix my car?\" -> NON_COOKING";

/// Renders the classification prompt for `query`.
pub fn classification_prompt(query: &Query) -> String {
    CLASSIFICATION_TEMPLATE.replacen(QUERY_PLACEHOLDER, query.as_str(), 1)
}
