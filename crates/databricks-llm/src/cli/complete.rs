//! The `databricks-llm complete` command.

use clap::Args;
use databricks_llm_core::{ChatClient, ChatMessage, Config};
use serde_json::Value;

/// Arguments for the `complete` command.
#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Prompt to send
    pub prompt: String,

    /// Serving endpoint / model name (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key (overrides config and DATABRICKS_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Serving endpoint base URL (overrides config and DATABRICKS_API_BASE)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Use the text completions route instead of chat completions
    #[arg(long)]
    pub no_chat: bool,

    /// System prompt to prepend (chat models only)
    #[arg(short, long)]
    pub system: Option<String>,

    /// Extra request parameter, repeatable. VALUE is parsed as JSON, else sent as a string
    #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, Value)>,

    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a `KEY=VALUE` passthrough option.
fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option name in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Lay CLI flags over the loaded config.
fn apply_overrides(args: &CompleteArgs, mut config: Config) -> Config {
    let section = &mut config.databricks;
    if let Some(model) = &args.model {
        section.model = model.clone();
    }
    if let Some(api_key) = &args.api_key {
        section.api_key = api_key.clone();
    }
    if let Some(api_base) = &args.api_base {
        section.api_base = api_base.clone();
    }
    if args.no_chat {
        section.is_chat_model = false;
    }
    for (key, value) in &args.options {
        section.options.insert(key.clone(), value.clone());
    }
    config
}

/// Execute the complete command.
pub async fn execute(args: CompleteArgs, config: Config) -> anyhow::Result<()> {
    let config = apply_overrides(&args, config);
    let is_chat_model = config.databricks.is_chat_model;
    let client = databricks_llm_core::client_from_config(&config.databricks);

    if !client.is_available().await {
        tracing::warn!(
            "{} client is missing an API key or base URL; the request will fail",
            client.name()
        );
    }

    let response = match &args.system {
        Some(system) if is_chat_model => {
            client
                .chat(&[ChatMessage::system(system), ChatMessage::user(&args.prompt)])
                .await?
        }
        Some(_) => {
            tracing::warn!("--system is ignored for text completion models");
            client.complete(&args.prompt).await?
        }
        None => client.complete(&args.prompt).await?,
    };

    tracing::info!(
        model = %response.model,
        tokens = ?response.tokens_used,
        latency_ms = response.latency_ms,
        "Completion received"
    );

    if args.json {
        let record = serde_json::json!({
            "text": response.text,
            "model": response.model,
            "tokens_used": response.tokens_used,
            "latency_ms": response.latency_ms,
        });
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", response.text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(prompt: &str) -> CompleteArgs {
        CompleteArgs {
            prompt: prompt.to_string(),
            model: None,
            api_key: None,
            api_base: None,
            no_chat: false,
            system: None,
            options: Vec::new(),
            json: false,
        }
    }

    #[test]
    fn test_parse_option_json_values() {
        assert_eq!(parse_option("top_p=0.9").unwrap(), ("top_p".to_string(), json!(0.9)));
        assert_eq!(
            parse_option("stop=[\"###\"]").unwrap(),
            ("stop".to_string(), json!(["###"]))
        );
        assert_eq!(parse_option("stream=false").unwrap().1, json!(false));
    }

    #[test]
    fn test_parse_option_falls_back_to_string() {
        assert_eq!(parse_option("user=alice").unwrap().1, json!("alice"));
        assert_eq!(parse_option("note=a=b").unwrap().1, json!("a=b"));
    }

    #[test]
    fn test_parse_option_rejects_malformed() {
        assert!(parse_option("no-equals").is_err());
        assert!(parse_option("=1").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut a = args("hi");
        a.model = Some("databricks-mixtral-8x7b-instruct".to_string());
        a.api_key = Some("k2".to_string());
        a.no_chat = true;
        a.options = vec![("top_p".to_string(), json!(0.5))];

        let config = apply_overrides(&a, Config::default());
        assert_eq!(config.databricks.model, "databricks-mixtral-8x7b-instruct");
        assert_eq!(config.databricks.api_key, "k2");
        assert!(config.databricks.api_base.is_empty());
        assert!(!config.databricks.is_chat_model);
        assert_eq!(config.databricks.options["top_p"], json!(0.5));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = apply_overrides(&args("hi"), Config::default());
        assert_eq!(config.databricks.model, "databricks-dbrx-instruct");
        assert!(config.databricks.is_chat_model);
        assert!(config.databricks.options.is_empty());
    }
}
