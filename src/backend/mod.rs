//! Backend communication with remote speech APIs.
//!
//! Provides the [`Backend`] capability and its two implementations: the
//! commercial MiniMax `t2a_v2` API and a self-hosted flashsummary service.

mod flashsummary;
mod minimax;
mod types;

pub use flashsummary::FlashSummaryBackend;
pub use minimax::MiniMaxBackend;
pub use types::{
    AudioSetting, BackendError, BaseResp, ExtraInfo, FlashSummaryRequest, T2aRequest, T2aResponse,
    VoiceSetting, VoiceSettings,
};

use crate::config::{Config, ConfigError};

/// Trait for text-to-speech backends.
///
/// This trait abstracts the HTTP communication with the speech services,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Which provider this backend talks to.
    fn provider(&self) -> Provider;

    /// Synthesize speech from text.
    ///
    /// # Returns
    /// Raw mp3 audio data
    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<Vec<u8>, BackendError>;
}

/// Speech provider selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    /// MiniMax hosted `t2a_v2` API
    #[default]
    MiniMax,

    /// Self-hosted flashsummary service
    FlashSummary,
}

impl Provider {
    /// Returns the short identifier for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::MiniMax => "minimax",
            Provider::FlashSummary => "flashsummary",
        }
    }

    /// Returns the human-readable name of the provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::MiniMax => "MiniMax",
            Provider::FlashSummary => "flashsummary",
        }
    }
}

/// One of the concrete backends, chosen explicitly by the caller.
pub enum TtsBackend {
    MiniMax(MiniMaxBackend),
    FlashSummary(FlashSummaryBackend),
}

impl Backend for TtsBackend {
    fn provider(&self) -> Provider {
        match self {
            TtsBackend::MiniMax(b) => b.provider(),
            TtsBackend::FlashSummary(b) => b.provider(),
        }
    }

    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<Vec<u8>, BackendError> {
        match self {
            TtsBackend::MiniMax(b) => b.synthesize(text, settings),
            TtsBackend::FlashSummary(b) => b.synthesize(text, settings),
        }
    }
}

/// Create a backend for the specified provider.
///
/// `credential` is the MiniMax bearer token; flashsummary authenticates with
/// the token from its configuration and ignores it.
pub fn create_backend(
    provider: Provider,
    config: &Config,
    credential: &str,
) -> Result<TtsBackend, ConfigError> {
    match provider {
        Provider::MiniMax => Ok(TtsBackend::MiniMax(MiniMaxBackend::new(
            &config.minimax,
            credential,
        ))),
        Provider::FlashSummary => Ok(TtsBackend::FlashSummary(FlashSummaryBackend::new(
            config.flashsummary()?.clone(),
        ))),
    }
}
