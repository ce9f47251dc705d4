//! HTTP client for a self-hosted flashsummary deployment.
//!
//! The service works in two steps: `/flashsummary/tts` renders the audio and
//! answers with where it was stored, then `/flashsummary/retrieveFileData`
//! serves the stored bytes.

use std::path::Path;

use reqwest::StatusCode;
use reqwest::blocking::Response;
use tracing::{debug, warn};

use crate::config::FlashSummaryConfig;

use super::types::{BackendError, FlashSummaryRequest, VoiceSettings};
use super::{Backend, Provider};

/// Flashsummary URL requester and audio downloader.
pub struct FlashSummaryBackend {
    config: FlashSummaryConfig,
    client: reqwest::blocking::Client,
}

impl FlashSummaryBackend {
    pub fn new(config: FlashSummaryConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Submit text for rendering and return the service's JSON answer as-is.
    ///
    /// The status code is not inspected; a body that is not JSON surfaces as
    /// [`BackendError::InvalidResponse`].
    pub fn request_tts_url(
        &self,
        request: &FlashSummaryRequest,
    ) -> Result<serde_json::Value, BackendError> {
        let url = format!(
            "{}/flashsummary/tts",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(%url, voice_id = request.voice_id, "Requesting flashsummary audio");

        let response = self
            .client
            .post(&url)
            .header("accept", "application/json, text/plain, */*")
            .header("x-checkout-header", &self.config.checkout_header)
            .header("x-client-header", &self.config.client_header)
            .query(&[("token", self.config.token.as_str())])
            .json(request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    /// Download stored audio to `output_path`.
    ///
    /// Returns `Ok(false)` on any status other than 200, in which case the
    /// output path is not touched.
    pub fn download_audio(
        &self,
        url: &str,
        port: u16,
        voice_path: &str,
        output_path: &Path,
    ) -> Result<bool, BackendError> {
        let response = self.retrieve(url, port, voice_path)?;

        if response.status() != StatusCode::OK {
            warn!(status = response.status().as_u16(), voice_path, "Audio download failed");
            return Ok(false);
        }

        let bytes = response
            .bytes()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        std::fs::write(output_path, &bytes)?;

        Ok(true)
    }

    fn retrieve(&self, url: &str, port: u16, voice_path: &str) -> Result<Response, BackendError> {
        let download_url = format!("{url}:{port}/flashsummary/retrieveFileData");
        debug!(%download_url, voice_path, "Retrieving flashsummary audio");

        self.client
            .get(&download_url)
            .header("accept", "*/*")
            .header("range", "bytes=0-")
            .query(&[
                ("stream", "True"),
                ("token", self.config.token.as_str()),
                ("voice_audio_path", voice_path),
            ])
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))
    }
}

impl Backend for FlashSummaryBackend {
    fn provider(&self) -> Provider {
        Provider::FlashSummary
    }

    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<Vec<u8>, BackendError> {
        let retrieve_url = self.config.retrieve_url.as_deref().ok_or_else(|| {
            BackendError::NotConfigured("FLASHSUMMARY_RETRIEVE_URL is not set".to_string())
        })?;

        let request = FlashSummaryRequest::from_settings(text, settings)?;
        let answer = self.request_tts_url(&request)?;

        let voice_path = answer
            .pointer(&self.config.audio_path_pointer)
            .and_then(|v| v.as_str())
            .ok_or_else(|| BackendError::Rejected {
                status: StatusCode::OK.as_u16(),
                body: answer.to_string(),
            })?;

        let response = self.retrieve(retrieve_url, self.config.retrieve_port, voice_path)?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response
                .text()
                .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
