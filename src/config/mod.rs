//! Runtime configuration.
//!
//! Endpoints, tokens and headers for both speech backends are resolved from
//! environment variables (optionally via a `.env` file) instead of living in
//! source.

mod settings;

pub use settings::{
    Config, ConfigError, DEFAULT_AUDIO_PATH_POINTER, DEFAULT_CHECKOUT_HEADER, DEFAULT_GROUP_ID,
    DEFAULT_MINIMAX_BASE_URL, DEFAULT_MINIMAX_MODEL, DEFAULT_RETRIEVE_PORT, FlashSummaryConfig,
    MiniMaxConfig,
};
