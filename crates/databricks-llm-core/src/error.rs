//! Error types for the Databricks chat client.
//!
//! Construction of a client never fails. Everything that can go wrong with
//! credentials, endpoints or the network surfaces as a [`ClientError`] when a
//! request is actually issued.

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised by a chat client while issuing a request.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required setting was never configured
    #[error(
        "{setting} not configured{}",
        .env_var.map(|var| format!(". Set the {var} env var.")).unwrap_or_default()
    )]
    MissingSetting {
        setting: &'static str,
        env_var: Option<&'static str>,
    },

    /// Transport failure or non-success HTTP status
    #[error("{message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    /// The endpoint answered but the body was unusable
    #[error("Invalid response: {0}")]
    Response(String),
}
