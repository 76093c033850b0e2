//! Generic client for OpenAI-compatible completion endpoints.
//!
//! Speaks the Chat Completions (`/chat/completions`) and legacy text
//! Completions (`/completions`) routes. Extra request parameters are carried
//! verbatim and merged into every request body.

use super::provider::{ChatClient, ChatMessage, CompletionResponse};
use crate::error::ClientError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

/// Configuration for an [`OpenAiLikeClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiLikeConfig {
    pub model: String,
    pub api_key: Option<String>,
    /// Base URL; request routes are appended to it
    pub api_base: Option<String>,
    /// Route `complete` through `/chat/completions` instead of `/completions`
    pub is_chat_model: bool,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
    /// Extra request parameters; these win over the typed fields above
    pub additional_options: Map<String, Value>,
    /// Env var named in the error when `api_key` is missing
    pub api_key_env: Option<&'static str>,
    /// Env var named in the error when `api_base` is missing
    pub api_base_env: Option<&'static str>,
}

impl OpenAiLikeConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            api_base: None,
            is_chat_model: false,
            temperature: 0.1,
            max_tokens: None,
            timeout: Duration::from_secs(60),
            additional_options: Map::new(),
            api_key_env: None,
            api_base_env: None,
        }
    }
}

/// Client for any endpoint that speaks the OpenAI completion protocol.
pub struct OpenAiLikeClient {
    name: String,
    config: OpenAiLikeConfig,
    client: reqwest::Client,
}

impl OpenAiLikeClient {
    pub fn new(config: OpenAiLikeConfig) -> Self {
        Self {
            name: "openai_like".to_string(),
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Override the name reported in logs and errors.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn config(&self) -> &OpenAiLikeConfig {
        &self.config
    }

    fn endpoint(&self, route: &str) -> Result<String, ClientError> {
        let base = self
            .config
            .api_base
            .as_deref()
            .ok_or(ClientError::MissingSetting {
                setting: "API base URL",
                env_var: self.config.api_base_env,
            })?;
        Ok(format!("{}/{route}", base.trim_end_matches('/')))
    }

    /// Serialize the typed request and lay the passthrough options over it.
    fn request_body<T: Serialize>(&self, request: &T) -> Result<Value, ClientError> {
        let mut body = serde_json::to_value(request)
            .map_err(|e| ClientError::Response(format!("Failed to encode request: {e}")))?;
        if let Value::Object(map) = &mut body {
            for (key, value) in &self.config.additional_options {
                map.insert(key.clone(), value.clone());
            }
        }
        Ok(body)
    }

    async fn post<R: DeserializeOwned>(&self, route: &str, body: &Value) -> Result<R, ClientError> {
        let url = self.endpoint(route)?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ClientError::MissingSetting {
                setting: "API key",
                env_var: self.config.api_key_env,
            })?;

        tracing::debug!(
            client = %self.name,
            model = %self.config.model,
            route,
            "Sending completion request"
        );

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| ClientError::Http {
                message: format!("{} request failed: {e}", self.name),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                message: format!("{} HTTP {status}: {text}", self.name),
                status_code: Some(status.as_u16()),
            });
        }

        resp.json().await.map_err(|e| {
            ClientError::Response(format!("Failed to parse {} response: {e}", self.name))
        })
    }

    fn empty_choices(&self) -> ClientError {
        ClientError::Response(format!(
            "{} returned empty choices array, no content generated",
            self.name
        ))
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct TextRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    model: String,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct TextResponse {
    choices: Vec<TextChoice>,
    #[serde(default)]
    model: String,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct TextChoice {
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

#[async_trait]
impl ChatClient for OpenAiLikeClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        self.config.api_key.is_some() && self.config.api_base.is_some()
    }

    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ClientError> {
        if self.config.is_chat_model {
            return self.chat(&[ChatMessage::user(prompt)]).await;
        }

        let start = Instant::now();
        let body = self.request_body(&TextRequest {
            model: &self.config.model,
            prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        })?;
        let resp: TextResponse = self.post("completions", &body).await?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| self.empty_choices())?;

        Ok(CompletionResponse {
            text: text.trim().to_string(),
            model: resp.model,
            tokens_used: resp.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<CompletionResponse, ClientError> {
        let start = Instant::now();
        let body = self.request_body(&ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        })?;
        let resp: ChatResponse = self.post("chat/completions", &body).await?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| self.empty_choices())?;

        Ok(CompletionResponse {
            text: text.trim().to_string(),
            model: resp.model,
            tokens_used: resp.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, is_chat_model: bool) -> OpenAiLikeClient {
        let mut config = OpenAiLikeConfig::new("test-model");
        config.api_key = Some("k1".to_string());
        config.api_base = Some(format!("{}/serving-endpoints/", server.uri()));
        config.is_chat_model = is_chat_model;
        OpenAiLikeClient::new(config)
    }

    fn chat_body(content: &str) -> Value {
        json!({
            "model": "test-model",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12}
        })
    }

    #[tokio::test]
    async fn test_chat_model_complete_uses_chat_route() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/serving-endpoints/chat/completions"))
            .and(header("authorization", "Bearer k1"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("  Hi there \n")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, true);
        let resp = client.complete("Hello").await.unwrap();
        assert_eq!(resp.text, "Hi there");
        assert_eq!(resp.model, "test-model");
        assert_eq!(resp.tokens_used, Some(12));
    }

    #[tokio::test]
    async fn test_text_model_complete_uses_completions_route() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/serving-endpoints/completions"))
            .and(body_partial_json(json!({"prompt": "Once upon"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "test-model",
                "choices": [{"index": 0, "text": " a time"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, false);
        let resp = client.complete("Once upon").await.unwrap();
        assert_eq!(resp.text, "a time");
        assert_eq!(resp.tokens_used, None);
    }

    #[tokio::test]
    async fn test_additional_options_merged_into_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/serving-endpoints/chat/completions"))
            .and(body_partial_json(json!({"top_p": 0.5, "temperature": 0.9})))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server, true);
        client
            .config
            .additional_options
            .insert("top_p".to_string(), json!(0.5));
        // Passthrough keys take precedence over typed fields
        client
            .config
            .additional_options
            .insert("temperature".to_string(), json!(0.9));

        let resp = client
            .chat(&[ChatMessage::system("Be brief."), ChatMessage::user("Hi")])
            .await
            .unwrap();
        assert_eq!(resp.text, "ok");
    }

    #[tokio::test]
    async fn test_http_error_carries_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let client = client_for(&server, true).with_name("DataBricks");
        let err = client.complete("Hello").await.unwrap_err();
        match err {
            ClientError::Http {
                message,
                status_code,
            } => {
                assert_eq!(status_code, Some(401));
                assert!(message.starts_with("DataBricks HTTP 401"));
                assert!(message.contains("invalid token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_response_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"model": "test-model", "choices": []})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, true);
        let err = client.complete("Hello").await.unwrap_err();
        assert!(matches!(err, ClientError::Response(_)));
    }

    #[tokio::test]
    async fn test_missing_settings_fail_at_request_time() {
        let client = OpenAiLikeClient::new(OpenAiLikeConfig::new("test-model"));
        assert!(!client.is_available().await);

        let err = client.complete("Hello").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingSetting {
                setting: "API base URL",
                env_var: None
            }
        ));
        assert_eq!(err.to_string(), "API base URL not configured");

        let mut config = OpenAiLikeConfig::new("test-model");
        config.api_base = Some("http://localhost:1".to_string());
        let client = OpenAiLikeClient::new(config);
        let err = client.complete("Hello").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingSetting {
                setting: "API key",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_setting_names_env_var() {
        let mut config = OpenAiLikeConfig::new("test-model");
        config.api_base_env = Some("MY_API_BASE");
        config.api_key_env = Some("MY_API_KEY");
        let client = OpenAiLikeClient::new(config.clone());
        let err = client.complete("Hello").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API base URL not configured. Set the MY_API_BASE env var."
        );

        config.api_base = Some("http://localhost:1".to_string());
        let client = OpenAiLikeClient::new(config);
        let err = client.chat(&[ChatMessage::user("Hello")]).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key not configured. Set the MY_API_KEY env var."
        );
    }

    #[test]
    fn test_default_temperature_serializes_exactly() {
        let client = OpenAiLikeClient::new(OpenAiLikeConfig::new("m"));
        let body = client
            .request_body(&ChatRequest {
                model: &client.config.model,
                messages: &[],
                temperature: client.config.temperature,
                max_tokens: None,
            })
            .unwrap();
        assert_eq!(body["temperature"], json!(0.1));
        assert_eq!(body["temperature"].to_string(), "0.1");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = OpenAiLikeConfig::new("m");
        config.api_base = Some("https://example/serving-endpoints/".to_string());
        let client = OpenAiLikeClient::new(config);
        assert_eq!(
            client.endpoint("chat/completions").unwrap(),
            "https://example/serving-endpoints/chat/completions"
        );
    }

    #[test]
    fn test_default_name_and_timeout() {
        let client = OpenAiLikeClient::new(OpenAiLikeConfig::new("m"));
        assert_eq!(client.name(), "openai_like");
        assert_eq!(client.timeout(), Duration::from_secs(60));

        let client = client.with_timeout(Duration::from_millis(1500));
        assert_eq!(client.timeout(), Duration::from_millis(1500));
    }
}
