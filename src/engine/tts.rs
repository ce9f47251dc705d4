//! TTS Engine implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{Backend, BackendError, VoiceSettings};

/// Errors that can occur during TTS operations.
#[derive(Error, Debug)]
pub enum TTSError {
    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Failed to write audio to {path}: {source}")]
    OutputFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Runs synthesis through a backend and persists the result.
pub struct TTSEngine<B: Backend> {
    backend: B,
}

impl<B: Backend> TTSEngine<B> {
    /// Create a new TTS engine.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Synthesize speech from text into memory.
    pub fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<Vec<u8>, TTSError> {
        Ok(self.backend.synthesize(text, settings)?)
    }

    /// Synthesize speech and write it to `output`.
    ///
    /// Returns `Ok(false)` when the service rejected the request; the status
    /// code and response body are printed to stdout and no file is created.
    /// A missing credential, transport failure or undecodable payload is an
    /// `Err`.
    pub fn synthesize_to_file(
        &self,
        text: &str,
        settings: &VoiceSettings,
        output: &Path,
    ) -> Result<bool, TTSError> {
        let audio_data = match self.backend.synthesize(text, settings) {
            Ok(audio) => audio,
            Err(BackendError::Rejected { status, body }) => {
                warn!(provider = self.backend.provider().as_str(), status, "Synthesis rejected");
                println!("{status}");
                println!("{body}");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let mut file = fs::File::create(output).map_err(|source| TTSError::OutputFile {
            path: output.to_path_buf(),
            source,
        })?;
        file.write_all(&audio_data)
            .map_err(|source| TTSError::OutputFile {
                path: output.to_path_buf(),
                source,
            })?;

        info!(
            provider = self.backend.provider().as_str(),
            path = %output.display(),
            bytes = audio_data.len(),
            "Audio saved"
        );

        Ok(true)
    }
}
