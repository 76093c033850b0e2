//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Databricks serving-endpoint settings.
///
/// `api_key` and `api_base` accept `${ENV_VAR}` references. Leaving either
/// empty defers to `DATABRICKS_API_KEY` / `DATABRICKS_API_BASE` when the
/// client is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabricksConfig {
    /// Serving endpoint / model identifier
    pub model: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Serving endpoint base URL (supports ${ENV_VAR} syntax)
    pub api_base: String,

    /// Use the chat completions route
    pub is_chat_model: bool,

    /// Sampling temperature
    pub temperature: f64,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Extra request parameters, forwarded verbatim
    pub options: Map<String, Value>,
}

impl Default for DatabricksConfig {
    fn default() -> Self {
        Self {
            model: "databricks-dbrx-instruct".to_string(),
            api_key: String::new(),
            api_base: String::new(),
            is_chat_model: true,
            temperature: 0.1,
            max_tokens: None,
            timeout_ms: 60_000,
            options: Map::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
