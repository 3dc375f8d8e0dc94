//! Query classification over the external oracle.
//!
//! The classifier never fails. Oracle errors, timeouts, and outputs without
//! the `COOKING` marker all resolve to [`QueryCategory::NonCooking`].

use std::sync::Arc;
use std::time::Duration;

use pipeline::{ClassificationOracle, Query, QueryCategory};
use tracing::{debug, info, warn};

use crate::prompts::classification_prompt;

/// Upper bound on a single oracle call unless configured otherwise.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Token whose presence in the oracle output marks a cooking query.
pub const COOKING_MARKER: &str = "COOKING";

/// Maps raw oracle output to a category.
///
/// The output is split into word tokens (letters, digits, `_`); the query is
/// cooking-related when one token is exactly `COOKING`. Matching is
/// case-sensitive, and `NON_COOKING` is a single token, so it does not count.
pub fn parse_verdict(raw: &str) -> QueryCategory {
    let marked = raw
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|token| token == COOKING_MARKER);
    if marked {
        QueryCategory::Cooking
    } else {
        QueryCategory::NonCooking
    }
}

/// Classifies queries by asking an injected [`ClassificationOracle`].
#[derive(Clone)]
pub struct QueryClassifier {
    oracle: Arc<dyn ClassificationOracle>,
    timeout: Duration,
}

impl QueryClassifier {
    /// Classifier with [`DEFAULT_ORACLE_TIMEOUT`].
    pub fn new(oracle: Arc<dyn ClassificationOracle>) -> Self {
        Self::with_timeout(oracle, DEFAULT_ORACLE_TIMEOUT)
    }

    /// Classifier with an explicit per-call timeout.
    pub fn with_timeout(oracle: Arc<dyn ClassificationOracle>, timeout: Duration) -> Self {
        Self { oracle, timeout }
    }

    /// Classifies `query`. Never fails.
    pub async fn classify(&self, query: &Query) -> QueryCategory {
        let prompt = classification_prompt(query);

        let raw = match tokio::time::timeout(self.timeout, self.oracle.classify(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!(error = %e, "classification oracle failed; treating query as non-cooking");
                return QueryCategory::NonCooking;
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "classification oracle timed out; treating query as non-cooking"
                );
                return QueryCategory::NonCooking;
            }
        };

        debug!(raw = %raw.trim(), "classification oracle answered");
        let category = parse_verdict(&raw);
        info!(%category, "query classified");
        category
    }
}

impl std::fmt::Debug for QueryClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClassifier")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingOracle, FewShotOracle, FixedOracle, SlowOracle};
    use pipeline::OracleError;

    #[test]
    fn verdict_requires_exact_marker_token() {
        assert_eq!(parse_verdict("COOKING"), QueryCategory::Cooking);
        assert_eq!(parse_verdict("  'COOKING'.\n"), QueryCategory::Cooking);
        assert_eq!(parse_verdict("Verdict: COOKING-related"), QueryCategory::Cooking);
        assert_eq!(parse_verdict("NON_COOKING"), QueryCategory::NonCooking);
        assert_eq!(parse_verdict("cooking"), QueryCategory::NonCooking);
        assert_eq!(parse_verdict("COOKINGS"), QueryCategory::NonCooking);
        assert_eq!(parse_verdict(""), QueryCategory::NonCooking);
    }

    #[tokio::test]
    async fn few_shot_examples_classify_as_expected() {
        let classifier = QueryClassifier::new(Arc::new(FewShotOracle));

        assert_eq!(
            classifier.classify(&Query::new("How do I make pancakes?")).await,
            QueryCategory::Cooking
        );
        assert_eq!(
            classifier.classify(&Query::new("What's the weather like?")).await,
            QueryCategory::NonCooking
        );
    }

    #[tokio::test]
    async fn oracle_errors_map_to_non_cooking() {
        for error in [
            OracleError::NotConfigured,
            OracleError::Unavailable {
                message: "connection refused".into(),
            },
            OracleError::Rejected {
                status: 429,
                message: "slow down".into(),
            },
        ] {
            let classifier = QueryClassifier::new(Arc::new(FailingOracle(error)));
            assert_eq!(
                classifier.classify(&Query::new("Recipe for pasta")).await,
                QueryCategory::NonCooking
            );
        }
    }

    #[tokio::test]
    async fn oracle_timeout_maps_to_non_cooking() {
        let classifier = QueryClassifier::with_timeout(
            Arc::new(SlowOracle(Duration::from_secs(5))),
            Duration::from_millis(20),
        );
        assert_eq!(
            classifier.classify(&Query::new("Recipe for pasta")).await,
            QueryCategory::NonCooking
        );
    }

    #[tokio::test]
    async fn output_without_marker_is_non_cooking() {
        let classifier = QueryClassifier::new(Arc::new(FixedOracle("I am not sure.".into())));
        assert_eq!(
            classifier.classify(&Query::new("Recipe for pasta")).await,
            QueryCategory::NonCooking
        );
    }
}
