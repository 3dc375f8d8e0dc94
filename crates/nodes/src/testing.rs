//! Deterministic oracle stubs shared by the unit tests in this crate.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{ClassificationOracle, OracleError};

/// Answers the way the prompt's few-shot examples do: `COOKING` when the
/// query mentions food, `NON_COOKING` otherwise.
pub struct FewShotOracle;

impl FewShotOracle {
    const COOKING_WORDS: &'static [&'static str] =
        &["cook", "recipe", "pancake", "pasta", "make", "ingredients", "stir fry"];
}

#[async_trait]
impl ClassificationOracle for FewShotOracle {
    async fn classify(&self, prompt: &str) -> Result<String, OracleError> {
        let query = prompt
            .lines()
            .find_map(|line| line.strip_prefix("Query: "))
            .unwrap_or_default()
            .to_lowercase();
        let cooking = !query.contains("weather")
            && Self::COOKING_WORDS.iter().any(|word| query.contains(word));
        Ok(if cooking { "COOKING" } else { "NON_COOKING" }.to_string())
    }
}

/// Always returns the same text.
pub struct FixedOracle(pub String);

#[async_trait]
impl ClassificationOracle for FixedOracle {
    async fn classify(&self, _prompt: &str) -> Result<String, OracleError> {
        Ok(self.0.clone())
    }
}

/// Always fails with the same error.
pub struct FailingOracle(pub OracleError);

#[async_trait]
impl ClassificationOracle for FailingOracle {
    async fn classify(&self, _prompt: &str) -> Result<String, OracleError> {
        Err(self.0.clone())
    }
}

/// Answers `COOKING` after sleeping.
pub struct SlowOracle(pub Duration);

#[async_trait]
impl ClassificationOracle for SlowOracle {
    async fn classify(&self, _prompt: &str) -> Result<String, OracleError> {
        tokio::time::sleep(self.0).await;
        Ok("COOKING".to_string())
    }
}
