//! Command-line and environment configuration.
//!
//! Every flag has an environment-variable equivalent so the service can be
//! configured entirely from the container environment.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use listener::ServerConfig;
use llm::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// SousChef recipe assistant server.
#[derive(Debug, Clone, Parser)]
#[command(name = "souschef", version, about)]
pub struct CliConfig {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// API key for the classification model. Without it every query is
    /// treated as non-cooking.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    /// Classification model name.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature for classification.
    #[arg(long, env = "CLASSIFIER_TEMPERATURE", default_value_t = llm::DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Seconds to wait for the classifier before treating a query as non-cooking.
    #[arg(long, env = "CLASSIFIER_TIMEOUT_SECS", default_value_t = 10)]
    pub classifier_timeout_secs: u64,

    /// Seconds before an HTTP request is aborted.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Comma-separated CORS origins; `*` allows any origin.
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://frontend:3000"
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; tracing export is disabled when unset.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl CliConfig {
    /// Rejects settings that cannot work together.
    ///
    /// The classifier must give up before the HTTP timeout fires; otherwise a
    /// slow oracle surfaces as a request timeout instead of a non-cooking
    /// reply.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.classifier_timeout_secs < self.request_timeout_secs,
            "CLASSIFIER_TIMEOUT_SECS ({}) must be lower than REQUEST_TIMEOUT_SECS ({})",
            self.classifier_timeout_secs,
            self.request_timeout_secs
        );
        Ok(())
    }

    /// Per-call classifier timeout.
    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_secs(self.classifier_timeout_secs)
    }

    /// HTTP settings for the listener.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            allowed_origins: self.cors_allowed_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Connection settings for the classification oracle. Its HTTP client
    /// shares the classifier timeout.
    pub fn oracle_config(&self) -> OpenAiConfig {
        OpenAiConfig::new(self.openai_api_key.clone())
            .with_base_url(&self.openai_base_url)
            .with_model(&self.model)
            .with_temperature(self.temperature)
            .with_request_timeout(self.classifier_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = CliConfig::try_parse_from([
            "souschef",
            "--port",
            "9000",
            "--cors-allowed-origins",
            "https://a.example,https://b.example",
            "--classifier-timeout-secs",
            "3",
            "--log-format",
            "pretty",
        ])
        .unwrap();

        assert_eq!(config.server_config().bind_addr.port(), 9000);
        assert_eq!(config.cors_allowed_origins.len(), 2);
        assert_eq!(config.classifier_timeout(), Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.oracle_config().request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn default_timeouts_are_accepted() {
        let config = CliConfig::try_parse_from(["souschef"]).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn classifier_timeout_must_undercut_request_timeout() {
        for classifier in ["30", "45"] {
            let config = CliConfig::try_parse_from([
                "souschef",
                "--classifier-timeout-secs",
                classifier,
                "--request-timeout-secs",
                "30",
            ])
            .unwrap();

            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("CLASSIFIER_TIMEOUT_SECS"), "{err}");
        }
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        CliConfig::command().debug_assert();
    }
}
