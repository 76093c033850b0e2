//! Chat client trait and request/response types.
//!
//! Defines the interface that chat-completion clients implement, plus the
//! environment helpers used when resolving credentials.

use crate::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// The response from a completion or chat call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,
    /// Model identifier reported by the endpoint
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all chat-completion clients implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn ChatClient>` for dynamic dispatch).
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Client name for logging (e.g., "DataBricks").
    fn name(&self) -> &str;

    /// Check whether the client has everything it needs to issue requests.
    async fn is_available(&self) -> bool;

    /// Complete a single prompt.
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ClientError>;

    /// Continue a chat conversation.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<CompletionResponse, ClientError>;

    /// Per-request timeout for this client.
    fn timeout(&self) -> Duration;
}

/// Look up a variable in the process environment.
///
/// Unset (or non-unicode) variables resolve to `None`.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve `${ENV_VAR}` references in config strings, reading variables
/// through `lookup`.
pub fn resolve_env_var_with<F>(value: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        lookup(var_name)
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
