//! SousChef LLM provider infrastructure adapter.
//!
//! Implements the [`pipeline::ClassificationOracle`] trait over any
//! OpenAI-compatible chat-completions endpoint. Additional providers are added
//! as new modules in this crate without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, and response
//! parsing live here. The [`pipeline`] crate sees only
//! [`pipeline::ClassificationOracle`]; timeouts on the whole call are enforced
//! by the classifier in the `nodes` crate.

pub mod openai;

pub use openai::{
    LlmError, OpenAiConfig, OpenAiProvider, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
