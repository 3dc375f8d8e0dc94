//! OpenAI-compatible chat-completions client used as the classification oracle.
//!
//! Any endpoint speaking the `/chat/completions` protocol works (OpenAI,
//! Ollama, vLLM). The prompt is sent as a single user message and the first
//! choice's content is returned untouched; interpreting it is the
//! classifier's job.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{ClassificationOracle, OracleError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

// ============================================================================
// Configuration
// ============================================================================

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Low temperature keeps the verdict stable.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// A verdict is one word; cap the completion accordingly.
const MAX_COMPLETION_TOKENS: u32 = 16;

const CONNECT_TIMEOUT_SECS: u64 = 5;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`OpenAiProvider`].
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Base URL up to and including the version segment (e.g. `.../v1`).
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Bearer token. `None` makes every call fail with
    /// [`OracleError::NotConfigured`].
    pub api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout enforced by the HTTP client.
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    /// Config with default endpoint, model, and timeouts.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            temperature: DEFAULT_TEMPERATURE,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Overrides the whole-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns `true` if an API key is present.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Errors raised while constructing a provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

// ============================================================================
// Provider
// ============================================================================

/// Classification oracle backed by an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Builds a provider and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ClientBuild`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.config.model,
            messages: vec![CompletionMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: MAX_COMPLETION_TOKENS,
        }
    }

    /// Maps a non-success response to an [`OracleError`].
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> OracleError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        OracleError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    /// Pulls the first choice's text out of a success body.
    fn extract_content(body: &str) -> Result<String, OracleError> {
        let response: CompletionResponse =
            serde_json::from_str(body).map_err(|e| OracleError::MalformedResponse {
                message: e.to_string(),
            })?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OracleError::MalformedResponse {
                message: "response contained no message content".to_owned(),
            })
    }
}

#[async_trait]
impl ClassificationOracle for OpenAiProvider {
    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn classify(&self, prompt: &str) -> Result<String, OracleError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(OracleError::NotConfigured);
        };

        debug!(prompt_len = prompt.len(), "sending classification request");
        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "failed to reach classification endpoint");
                OracleError::Unavailable {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| OracleError::Unavailable {
            message: format!("failed to read response: {e}"),
        })?;

        if !status.is_success() {
            let err = Self::parse_error_response(status, &body);
            error!(error = %err, "classification endpoint returned an error");
            return Err(err);
        }

        Self::extract_content(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(config: OpenAiConfig) -> OpenAiProvider {
        OpenAiProvider::new(config).unwrap()
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert!(!OpenAiConfig::new(Some("  ".into())).has_credentials());
        assert!(OpenAiConfig::new(Some("sk-test".into())).has_credentials());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", OpenAiConfig::new(Some("sk-secret".into())));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn api_url_joins_without_double_slash() {
        let p = provider(OpenAiConfig::new(None).with_base_url("http://localhost:11434/v1/"));
        assert_eq!(
            p.api_url("chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn request_body_carries_prompt_as_single_user_message() {
        let p = provider(
            OpenAiConfig::new(None)
                .with_model("test-model")
                .with_temperature(0.0),
        );
        let body = serde_json::to_value(p.build_request("classify me")).unwrap();

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "classify me");
        assert_eq!(body["max_tokens"], MAX_COMPLETION_TOKENS);
    }

    #[test]
    fn content_is_taken_from_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"COOKING"}},{"message":{"content":"NON_COOKING"}}]}"#;
        assert_eq!(OpenAiProvider::extract_content(body).unwrap(), "COOKING");
    }

    #[test]
    fn empty_or_invalid_bodies_are_malformed() {
        for body in [r#"{"choices":[]}"#, r#"{"choices":[{"message":{}}]}"#, "not json"] {
            assert!(matches!(
                OpenAiProvider::extract_content(body),
                Err(OracleError::MalformedResponse { .. })
            ));
        }
    }

    #[test]
    fn error_bodies_are_mapped_to_rejections() {
        let err = OpenAiProvider::parse_error_response(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        );
        assert_eq!(
            err,
            OracleError::Rejected {
                status: 401,
                message: "Incorrect API key provided".into()
            }
        );

        let err = OpenAiProvider::parse_error_response(
            reqwest::StatusCode::BAD_GATEWAY,
            "upstream down",
        );
        assert_eq!(
            err,
            OracleError::Rejected {
                status: 502,
                message: "upstream down".into()
            }
        );
    }

    #[tokio::test]
    async fn missing_credentials_fail_without_network() {
        let p = provider(OpenAiConfig::new(None).with_base_url("http://127.0.0.1:9"));
        assert_eq!(
            p.classify("anything").await.unwrap_err(),
            OracleError::NotConfigured
        );
    }
}
