//! Configuration loading and validation for rss-summa.
//!
//! Settings come from a `config.toml` with exactly eight mandatory keys. Every
//! key is checked for presence and TOML type up front, so a bad file fails
//! before any network traffic happens.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml::{Table, Value};

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("the {field} field must be a {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("the {field} field is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Validated runtime configuration
#[derive(Clone, PartialEq)]
pub struct Config {
    /// Feed to summarise
    pub rss_url: String,
    /// Model identifier passed to the chat-completions endpoint
    pub model: String,
    /// Bearer credential for the endpoint
    pub api_key: String,
    /// OpenAI-compatible API root, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// System prompt sent with every request
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Per-request timeout in seconds
    pub timeout: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rss_url", &self.rss_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("prompt", &self.prompt)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::find_config_file()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: Table = toml::from_str(content)?;

        Ok(Self {
            rss_url: string_field(&table, "rss_url")?,
            model: string_field(&table, "model")?,
            api_key: string_field(&table, "api_key")?,
            base_url: string_field(&table, "base_url")?,
            prompt: string_field(&table, "prompt")?,
            temperature: float_field(&table, "temperature")?,
            max_tokens: integer_field(&table, "max_tokens")?,
            timeout: integer_field(&table, "timeout")?,
        })
    }

    /// Find the config file in standard locations
    fn find_config_file() -> PathBuf {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return local_config;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home
                .join(".config")
                .join("rss-summa")
                .join(CONFIG_FILE_NAME);
            if home_config.exists() {
                return home_config;
            }
        }

        // Default to local path (will error on read)
        local_config
    }
}

fn field<'a>(table: &'a Table, name: &'static str) -> Result<&'a Value, ConfigError> {
    table.get(name).ok_or(ConfigError::MissingField(name))
}

fn wrong_type(name: &'static str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::WrongType {
        field: name,
        expected,
        found: value.type_str(),
    }
}

fn string_field(table: &Table, name: &'static str) -> Result<String, ConfigError> {
    let value = field(table, name)?;
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| wrong_type(name, "string", value))
}

// Integer literals are rejected here: `temperature = 1` must be written `1.0`.
fn float_field(table: &Table, name: &'static str) -> Result<f64, ConfigError> {
    let value = field(table, name)?;
    value.as_float().ok_or_else(|| wrong_type(name, "float", value))
}

fn integer_field<T: TryFrom<i64>>(table: &Table, name: &'static str) -> Result<T, ConfigError> {
    let value = field(table, name)?;
    let raw = value
        .as_integer()
        .ok_or_else(|| wrong_type(name, "integer", value))?;
    T::try_from(raw).map_err(|_| ConfigError::OutOfRange {
        field: name,
        value: raw,
    })
}
