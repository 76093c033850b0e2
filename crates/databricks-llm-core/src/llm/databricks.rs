//! Databricks model-serving endpoints (OpenAI-compatible API).
//!
//! Databricks serving endpoints speak the OpenAI Chat Completions format, so
//! this only resolves credentials and hands back a configured
//! [`OpenAiLikeClient`]. Anything not set explicitly is read from
//! `DATABRICKS_API_KEY` / `DATABRICKS_API_BASE`, once, at creation time.
//!
//! ```rust,ignore
//! use databricks_llm_core::{ChatClient, Databricks, DatabricksOptions};
//!
//! let llm = Databricks::create(
//!     DatabricksOptions::new("databricks-dbrx-instruct")
//!         .api_base("https://my-workspace.cloud.databricks.com/serving-endpoints"),
//! );
//! let response = llm.complete("Explain the importance of open source LLMs").await?;
//! println!("{}", response.text);
//! ```

use super::openai_like::{OpenAiLikeClient, OpenAiLikeConfig};
use super::provider::process_env;
use serde_json::{Map, Value};

/// Environment variable holding the default API key.
pub const API_KEY_ENV: &str = "DATABRICKS_API_KEY";

/// Environment variable holding the default serving-endpoint URL.
pub const API_BASE_ENV: &str = "DATABRICKS_API_BASE";

/// Inputs for [`Databricks::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct DatabricksOptions {
    pub model: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub is_chat_model: bool,
    /// Forwarded verbatim to the delegate client
    pub extra: Map<String, Value>,
}

impl DatabricksOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            api_base: None,
            is_chat_model: true,
            extra: Map::new(),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn is_chat_model(mut self, is_chat_model: bool) -> Self {
        self.is_chat_model = is_chat_model;
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Factory for clients bound to a Databricks serving endpoint.
pub struct Databricks;

impl Databricks {
    const TYPE_NAME: &'static str = "DataBricks";

    /// Fixed identifier for this client variant.
    pub fn type_name() -> &'static str {
        Self::TYPE_NAME
    }

    /// Build a client, falling back to the process environment.
    pub fn create(options: DatabricksOptions) -> OpenAiLikeClient {
        Self::create_with_env(options, process_env)
    }

    /// Build a client, falling back to `lookup` for unset credentials.
    ///
    /// Never fails and performs no network I/O. Missing settings surface
    /// when the client issues its first request.
    pub fn create_with_env<F>(options: DatabricksOptions, lookup: F) -> OpenAiLikeClient
    where
        F: Fn(&str) -> Option<String>,
    {
        let DatabricksOptions {
            model,
            api_key,
            api_base,
            is_chat_model,
            extra,
        } = options;

        // Empty explicit values count as unset
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .or_else(|| lookup(API_KEY_ENV));
        let api_base = api_base
            .filter(|base| !base.is_empty())
            .or_else(|| lookup(API_BASE_ENV));

        tracing::debug!(
            model = %model,
            api_base = api_base.as_deref().unwrap_or("<unset>"),
            api_key_set = api_key.is_some(),
            is_chat_model,
            extra_options = extra.len(),
            "Configured {} client",
            Self::TYPE_NAME
        );

        let mut config = OpenAiLikeConfig::new(model);
        config.api_key = api_key;
        config.api_base = api_base;
        config.is_chat_model = is_chat_model;
        config.additional_options = extra;
        config.api_key_env = Some(API_KEY_ENV);
        config.api_base_env = Some(API_BASE_ENV);

        OpenAiLikeClient::new(config).with_name(Self::TYPE_NAME)
    }
}
