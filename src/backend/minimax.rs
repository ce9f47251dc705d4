//! HTTP client for the MiniMax `t2a_v2` speech API.

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::config::MiniMaxConfig;

use super::types::{BackendError, T2aRequest, T2aResponse, VoiceSettings};
use super::{Backend, Provider};

/// Direct synthesizer backed by MiniMax.
pub struct MiniMaxBackend {
    base_url: String,
    group_id: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl MiniMaxBackend {
    /// Create a client authenticating with `api_key` as a bearer token.
    pub fn new(config: &MiniMaxConfig, api_key: impl Into<String>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            group_id: config.group_id.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Get the synthesis endpoint, including the group id.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/t2a_v2?GroupId={}", self.base_url, self.group_id)
    }
}

impl Backend for MiniMaxBackend {
    fn provider(&self) -> Provider {
        Provider::MiniMax
    }

    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<Vec<u8>, BackendError> {
        if self.api_key.is_empty() {
            return Err(BackendError::MissingCredential);
        }

        let url = self.endpoint();
        let request = T2aRequest::new(&self.model, text, settings);
        debug!(%url, voice_id = %settings.voice_id, "Sending t2a request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "t2a request failed");
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // A 200 with an unparseable body is treated the same as a missing field.
        let parsed = serde_json::from_str(&body)
            .map(|value: serde_json::Value| T2aResponse::from_json(&value))
            .unwrap_or_default();

        let Some(audio_hex) = parsed.audio_hex() else {
            let status_msg = parsed.base_resp.as_ref().map(|b| b.status_msg.as_str());
            warn!(status_msg = ?status_msg, "t2a response carried no audio");
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                body,
            });
        };

        if let Some(extra) = &parsed.extra_info {
            info!(
                length = ?extra.audio_length,
                sample_rate = ?extra.audio_sample_rate,
                size = ?extra.audio_size,
                bitrate = ?extra.audio_bitrate,
                format = ?extra.audio_format,
                "Audio info"
            );
        }

        hex::decode(audio_hex.trim())
            .map_err(|e| BackendError::InvalidResponse(format!("audio is not valid hex: {e}")))
    }
}
