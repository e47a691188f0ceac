//! Error types for the profiler.

use std::time::Duration;

/// Top-level error type for the profiler.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Conversational flow errors.
///
/// Malformed model output and spreadsheet failures are handled inside the
/// flow as user-facing messages; only transport-level LLM failures escape
/// a turn.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Spreadsheet persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Spreadsheet append failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Spreadsheet authentication failed")]
    AuthFailed,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Chat-surface errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Terminal input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
