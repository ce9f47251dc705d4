//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::backend::VoiceSettings;

/// Text-to-speech via the MiniMax speech API.
#[derive(Parser, Debug)]
#[command(name = "remote-tts-rs")]
#[command(about = "Convert text to speech with the MiniMax t2a API and save it as mp3")]
#[command(version)]
pub struct Args {
    /// Text to synthesize
    pub text: String,

    /// MiniMax voice identifier
    pub voice_id: String,

    /// Output audio file
    pub output: PathBuf,

    /// MiniMax API token
    pub token: String,
}

impl Args {
    /// Speed, volume and pitch used for every CLI synthesis.
    pub const SPEED: f32 = 1.0;
    pub const VOLUME: f32 = 1.0;
    pub const PITCH: i32 = 0;

    /// Voice settings for this invocation.
    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings::new(&self.voice_id)
            .with_speed(Self::SPEED)
            .with_volume(Self::VOLUME)
            .with_pitch(Self::PITCH)
    }
}
