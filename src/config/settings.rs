//! Environment-backed settings for the speech backends.

use thiserror::Error;

pub const DEFAULT_MINIMAX_BASE_URL: &str = "https://api.minimax.chat";
pub const DEFAULT_GROUP_ID: &str = "123456";
pub const DEFAULT_MINIMAX_MODEL: &str = "speech-01-turbo";
pub const DEFAULT_CHECKOUT_HEADER: &str = "_checkout";
pub const DEFAULT_RETRIEVE_PORT: u16 = 8443;
pub const DEFAULT_AUDIO_PATH_POINTER: &str = "/voice_audio_path";

/// Errors that can occur while resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid port in {var}: {value}")]
    InvalidPort { var: &'static str, value: String },

    #[error("Backend not configured: {0}")]
    NotConfigured(String),
}

/// Settings for the MiniMax `t2a_v2` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MiniMaxConfig {
    pub base_url: String,
    pub group_id: String,
    pub model: String,
}

impl Default for MiniMaxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MINIMAX_BASE_URL.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            model: DEFAULT_MINIMAX_MODEL.to_string(),
        }
    }
}

impl MiniMaxConfig {
    /// Load MiniMax settings alone, reading `.env` first if present.
    ///
    /// Flashsummary variables are never consulted, so they cannot fail this.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve MiniMax settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            base_url: var("MINIMAX_BASE_URL").unwrap_or(defaults.base_url),
            group_id: var("MINIMAX_GROUP_ID").unwrap_or(defaults.group_id),
            model: var("MINIMAX_MODEL").unwrap_or(defaults.model),
        }
    }
}

/// Settings for a self-hosted flashsummary deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashSummaryConfig {
    /// Host serving `/flashsummary/tts`, e.g. `https://host:8443`.
    pub base_url: String,
    pub token: String,
    pub client_header: String,
    pub checkout_header: String,
    /// Host (without port) serving `/flashsummary/retrieveFileData`.
    pub retrieve_url: Option<String>,
    pub retrieve_port: u16,
    /// JSON pointer locating the stored audio path in a `/tts` response.
    pub audio_path_pointer: String,
}

impl FlashSummaryConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            client_header: String::new(),
            checkout_header: DEFAULT_CHECKOUT_HEADER.to_string(),
            retrieve_url: None,
            retrieve_port: DEFAULT_RETRIEVE_PORT,
            audio_path_pointer: DEFAULT_AUDIO_PATH_POINTER.to_string(),
        }
    }

    pub fn with_retrieve(mut self, url: impl Into<String>, port: u16) -> Self {
        self.retrieve_url = Some(url.into());
        self.retrieve_port = port;
        self
    }
}

/// Resolved configuration for all backends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub minimax: MiniMaxConfig,
    pub flashsummary: Option<FlashSummaryConfig>,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let minimax = MiniMaxConfig::from_lookup(&lookup);
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let flashsummary = match var("FLASHSUMMARY_BASE_URL") {
            Some(base_url) => {
                let token = var("FLASHSUMMARY_TOKEN")
                    .ok_or(ConfigError::Missing("FLASHSUMMARY_TOKEN"))?;

                let retrieve_port = match var("FLASHSUMMARY_RETRIEVE_PORT") {
                    Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                        var: "FLASHSUMMARY_RETRIEVE_PORT",
                        value,
                    })?,
                    None => DEFAULT_RETRIEVE_PORT,
                };

                Some(FlashSummaryConfig {
                    base_url,
                    token,
                    client_header: var("FLASHSUMMARY_CLIENT_HEADER").unwrap_or_default(),
                    checkout_header: var("FLASHSUMMARY_CHECKOUT_HEADER")
                        .unwrap_or_else(|| DEFAULT_CHECKOUT_HEADER.to_string()),
                    retrieve_url: var("FLASHSUMMARY_RETRIEVE_URL"),
                    retrieve_port,
                    audio_path_pointer: var("FLASHSUMMARY_AUDIO_PATH_POINTER")
                        .unwrap_or_else(|| DEFAULT_AUDIO_PATH_POINTER.to_string()),
                })
            }
            None => None,
        };

        Ok(Self {
            minimax,
            flashsummary,
        })
    }

    /// Flashsummary settings, or an error naming the missing variable.
    pub fn flashsummary(&self) -> Result<&FlashSummaryConfig, ConfigError> {
        self.flashsummary.as_ref().ok_or_else(|| {
            ConfigError::NotConfigured("set FLASHSUMMARY_BASE_URL to enable flashsummary".to_string())
        })
    }
}
