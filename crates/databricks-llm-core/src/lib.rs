//! Databricks LLM Core - OpenAI-compatible chat client for Databricks
//! model-serving endpoints.
//!
//! Databricks serving endpoints accept the OpenAI Chat Completions protocol.
//! [`Databricks`] resolves the endpoint URL and API key (explicit values
//! first, then `DATABRICKS_API_BASE` / `DATABRICKS_API_KEY`) and returns a
//! configured [`OpenAiLikeClient`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use databricks_llm_core::{ChatClient, Databricks, DatabricksOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), databricks_llm_core::ClientError> {
//!     let llm = Databricks::create(DatabricksOptions::new("databricks-dbrx-instruct"));
//!     let response = llm.complete("Explain the importance of open source LLMs").await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod llm;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ClientError, ConfigError};
pub use llm::{
    ChatClient, ChatMessage, CompletionResponse, Databricks, DatabricksOptions, MessageRole,
    OpenAiLikeClient, OpenAiLikeConfig, API_BASE_ENV, API_KEY_ENV,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a client from the `[databricks]` config section.
///
/// Config values count as explicit settings; empty or unresolvable
/// `${ENV_VAR}` entries fall back to the Databricks environment variables.
pub fn client_from_config(config: &config::DatabricksConfig) -> OpenAiLikeClient {
    client_from_config_with_env(config, llm::process_env)
}

/// Like [`client_from_config`], reading the environment through `lookup`.
pub fn client_from_config_with_env<F>(
    config: &config::DatabricksConfig,
    lookup: F,
) -> OpenAiLikeClient
where
    F: Fn(&str) -> Option<String>,
{
    let mut options = DatabricksOptions::new(config.model.clone())
        .is_chat_model(config.is_chat_model)
        .option("temperature", config.temperature);
    if let Some(max_tokens) = config.max_tokens {
        options = options.option("max_tokens", max_tokens);
    }
    for (key, value) in &config.options {
        options = options.option(key.clone(), value.clone());
    }
    options.api_key = llm::resolve_env_var_with(&config.api_key, &lookup);
    options.api_base = llm::resolve_env_var_with(&config.api_base, &lookup);

    Databricks::create_with_env(options, &lookup)
        .with_timeout(std::time::Duration::from_millis(config.timeout_ms))
}
