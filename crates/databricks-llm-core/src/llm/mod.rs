//! Chat-completion clients.
//!
//! Provides the [`ChatClient`] abstraction, a generic client for
//! OpenAI-compatible endpoints, and the Databricks preset that configures it
//! for a model-serving endpoint.

pub(crate) mod databricks;
pub(crate) mod openai_like;
pub(crate) mod provider;

pub use databricks::{Databricks, DatabricksOptions, API_BASE_ENV, API_KEY_ENV};
pub use openai_like::{OpenAiLikeClient, OpenAiLikeConfig};
pub use provider::{
    process_env, resolve_env_var_with, ChatClient, ChatMessage, CompletionResponse, MessageRole,
};
