//! Configuration for the profiler.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

/// Default OpenAI-compatible endpoint (Groq's).
const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai";

/// Default model, matching the deployed profiling bot.
const DEFAULT_LLM_MODEL: &str = "gemma2-9b-it";

/// Default Sheets API endpoint.
const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Main configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub sheets: SheetsConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            llm: LlmConfig::from_env()?,
            sheets: SheetsConfig::from_env()?,
        })
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Model to use (e.g. "gemma2-9b-it").
    pub model: String,
    /// API key for the endpoint.
    pub api_key: SecretString,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of retries for transient errors.
    pub max_retries: u32,
}

impl LlmConfig {
    fn from_env() -> Result<Self, ConfigError> {
        // GROQ_API_KEY is accepted as a fallback because the hosted bot
        // runs against Groq.
        let api_key = optional_env("LLM_API_KEY")?
            .or(optional_env("GROQ_API_KEY")?)
            .ok_or_else(|| ConfigError::MissingRequired {
                key: "LLM_API_KEY".to_string(),
                hint: "Set LLM_API_KEY (or GROQ_API_KEY) to an API key for an \
                       OpenAI-compatible endpoint"
                    .to_string(),
            })?;

        Ok(Self {
            base_url: optional_env("LLM_BASE_URL")?
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            model: optional_env("LLM_MODEL")?.unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            api_key: SecretString::from(api_key),
            timeout_secs: parse_optional_env("LLM_TIMEOUT_SECS", 120)?,
            max_retries: parse_optional_env("LLM_MAX_RETRIES", 2)?,
        })
    }

    /// Get the API key (exposes the secret).
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Spreadsheet persistence configuration.
///
/// The id and token are optional here so `--dry-run` works without
/// credentials; `SheetsStore::new` enforces their presence.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Spreadsheet to append rows to.
    pub spreadsheet_id: Option<String>,
    /// Worksheet range the append targets (e.g. "A1" or "Hoja 1!A1").
    pub range: String,
    /// Sheets API base URL.
    pub api_base: String,
    /// OAuth bearer token with spreadsheet write access.
    pub token: Option<SecretString>,
}

impl SheetsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            spreadsheet_id: optional_env("SHEETS_SPREADSHEET_ID")?,
            range: optional_env("SHEETS_RANGE")?.unwrap_or_else(|| "A1".to_string()),
            api_base: optional_env("SHEETS_API_BASE")?
                .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string()),
            token: optional_env("SHEETS_ACCESS_TOKEN")?.map(SecretString::from),
        })
    }
}

pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "failed to read {key}: {e}"
        ))),
    }
}

pub(crate) fn parse_optional_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)?
        .map(|s| {
            s.parse().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{e}"),
            })
        })
        .transpose()
        .map(|opt| opt.unwrap_or(default))
}
