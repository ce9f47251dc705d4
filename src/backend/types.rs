//! Backend request/response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when communicating with the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("MiniMax API key not configured")]
    MissingCredential,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Voice characteristics shared by every backend.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    pub voice_id: String,
    pub speed: f32,
    pub volume: f32,
    pub pitch: i32,
    pub emotion: Option<String>,
}

impl VoiceSettings {
    /// Create settings for a voice with neutral speed, volume and pitch.
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            speed: 1.0,
            volume: 1.0,
            pitch: 0,
            emotion: None,
        }
    }

    /// Set the speech speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the volume multiplier.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Set the pitch offset.
    pub fn with_pitch(mut self, pitch: i32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Set the emotion tag.
    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }
}

// ---------------------------------------------------------------------------
// MiniMax t2a_v2
// ---------------------------------------------------------------------------

pub const SAMPLE_RATE: u32 = 32000;
pub const BITRATE: u32 = 128000;
pub const AUDIO_FORMAT: &str = "mp3";

/// Request body for `POST /v1/t2a_v2`.
#[derive(Debug, Clone, Serialize)]
pub struct T2aRequest {
    pub model: String,
    pub text: String,
    pub stream: bool,
    pub voice_setting: VoiceSetting,
    pub audio_setting: AudioSetting,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceSetting {
    pub voice_id: String,
    pub speed: f32,
    pub vol: f32,
    pub pitch: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioSetting {
    pub sample_rate: u32,
    pub bitrate: u32,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl T2aRequest {
    /// Build a non-streaming mp3 request.
    pub fn new(model: impl Into<String>, text: impl Into<String>, settings: &VoiceSettings) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
            stream: false,
            voice_setting: VoiceSetting {
                voice_id: settings.voice_id.clone(),
                speed: settings.speed,
                vol: settings.volume,
                pitch: settings.pitch,
            },
            audio_setting: AudioSetting {
                sample_rate: SAMPLE_RATE,
                bitrate: BITRATE,
                format: AUDIO_FORMAT.to_string(),
                emotion: settings.emotion.clone().filter(|e| !e.is_empty()),
            },
        }
    }
}

/// Response body from `POST /v1/t2a_v2`.
///
/// Only `data.audio` decides success. The metadata blocks are read leniently
/// and dropped when their shape is unexpected.
#[derive(Debug, Clone, Default)]
pub struct T2aResponse {
    pub audio: Option<String>,
    pub extra_info: Option<ExtraInfo>,
    pub base_resp: Option<BaseResp>,
}

/// Metadata about the generated audio.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtraInfo {
    pub audio_length: Option<f64>,
    pub audio_sample_rate: Option<f64>,
    pub audio_size: Option<f64>,
    pub audio_bitrate: Option<f64>,
    pub audio_format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseResp {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub status_msg: String,
}

impl T2aResponse {
    /// Pick the audio payload and metadata out of a response document.
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self {
            audio: value
                .pointer("/data/audio")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            extra_info: lenient_section(value, "extra_info"),
            base_resp: lenient_section(value, "base_resp"),
        }
    }

    /// The hex audio payload, unless the API reported an error.
    pub fn audio_hex(&self) -> Option<&str> {
        if self.base_resp.as_ref().is_some_and(|b| b.status_code != 0) {
            return None;
        }
        self.audio.as_deref()
    }
}

fn lenient_section<T: serde::de::DeserializeOwned>(value: &serde_json::Value, key: &str) -> Option<T> {
    serde_json::from_value(value.get(key)?.clone()).ok()
}

// ---------------------------------------------------------------------------
// flashsummary
// ---------------------------------------------------------------------------

pub const DEFAULT_FS_VOICE_ID: u32 = 1683;
pub const DEFAULT_FS_EMOTION: u32 = 17;

/// Request body for `POST /flashsummary/tts`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlashSummaryRequest {
    pub voice_id: u32,
    pub to_lang: String,
    pub format: String,
    pub speed_factor: f32,
    pub pitch_factor: f32,
    #[serde(rename = "volume_change_dB")]
    pub volume_change_db: f32,
    pub emotion: u32,
    pub text: String,
    pub code: String,
}

impl FlashSummaryRequest {
    /// Create a request with the service's default voice parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            voice_id: DEFAULT_FS_VOICE_ID,
            to_lang: "auto".to_string(),
            format: AUDIO_FORMAT.to_string(),
            speed_factor: 1.0,
            pitch_factor: 0.0,
            volume_change_db: 0.0,
            emotion: DEFAULT_FS_EMOTION,
            text: text.into(),
            code: String::new(),
        }
    }

    pub fn with_voice(mut self, voice_id: u32) -> Self {
        self.voice_id = voice_id;
        self
    }

    pub fn with_speed(mut self, speed_factor: f32) -> Self {
        self.speed_factor = speed_factor;
        self
    }

    pub fn with_pitch(mut self, pitch_factor: f32) -> Self {
        self.pitch_factor = pitch_factor;
        self
    }

    pub fn with_volume_db(mut self, volume_change_db: f32) -> Self {
        self.volume_change_db = volume_change_db;
        self
    }

    pub fn with_emotion(mut self, emotion: u32) -> Self {
        self.emotion = emotion;
        self
    }

    /// Map shared voice settings onto flashsummary parameters.
    ///
    /// The volume multiplier becomes a decibel change (`20 * log10(volume)`).
    pub fn from_settings(text: &str, settings: &VoiceSettings) -> Result<Self, BackendError> {
        let voice_id = settings.voice_id.trim().parse().map_err(|_| {
            BackendError::InvalidRequest(format!(
                "flashsummary voice id must be numeric, got '{}'",
                settings.voice_id
            ))
        })?;

        let emotion = match &settings.emotion {
            Some(e) => e.trim().parse().map_err(|_| {
                BackendError::InvalidRequest(format!(
                    "flashsummary emotion must be numeric, got '{e}'"
                ))
            })?,
            None => DEFAULT_FS_EMOTION,
        };

        if settings.volume <= 0.0 {
            return Err(BackendError::InvalidRequest(format!(
                "volume must be positive, got {}",
                settings.volume
            )));
        }

        Ok(Self::new(text)
            .with_voice(voice_id)
            .with_speed(settings.speed)
            .with_pitch(settings.pitch as f32)
            .with_volume_db(20.0 * settings.volume.log10())
            .with_emotion(emotion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_settings_builder() {
        let settings = VoiceSettings::new("male-qn-qingse")
            .with_speed(1.5)
            .with_volume(0.8)
            .with_pitch(-2)
            .with_emotion("happy");

        assert_eq!(settings.voice_id, "male-qn-qingse");
        assert_eq!(settings.speed, 1.5);
        assert_eq!(settings.volume, 0.8);
        assert_eq!(settings.pitch, -2);
        assert_eq!(settings.emotion.as_deref(), Some("happy"));
    }

    #[test]
    fn test_voice_settings_defaults() {
        let settings = VoiceSettings::new("v");

        assert_eq!(settings.speed, 1.0);
        assert_eq!(settings.volume, 1.0);
        assert_eq!(settings.pitch, 0);
        assert_eq!(settings.emotion, None);
    }

    #[test]
    fn test_t2a_request_serialize() {
        let request = T2aRequest::new("speech-01-turbo", "Hello", &VoiceSettings::new("v1"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "speech-01-turbo");
        assert_eq!(json["stream"], false);
        assert_eq!(json["voice_setting"]["voice_id"], "v1");
        assert_eq!(json["voice_setting"]["vol"], 1.0);
        assert_eq!(json["voice_setting"]["pitch"], 0);
        assert_eq!(json["audio_setting"]["sample_rate"], 32000);
        assert_eq!(json["audio_setting"]["bitrate"], 128000);
        assert_eq!(json["audio_setting"]["format"], "mp3");
        assert!(json["audio_setting"].get("emotion").is_none());
    }

    #[test]
    fn test_t2a_request_emotion_in_audio_setting() {
        let settings = VoiceSettings::new("v1").with_emotion("sad");
        let json = serde_json::to_value(T2aRequest::new("m", "t", &settings)).unwrap();

        assert_eq!(json["audio_setting"]["emotion"], "sad");
        assert!(json["voice_setting"].get("emotion").is_none());
    }

    #[test]
    fn test_t2a_request_skips_empty_emotion() {
        let settings = VoiceSettings::new("v1").with_emotion("");
        let json = serde_json::to_value(T2aRequest::new("m", "t", &settings)).unwrap();

        assert!(json["audio_setting"].get("emotion").is_none());
    }

    #[test]
    fn test_t2a_response_audio() {
        let json = r#"{
            "data": {"audio": "68656c6c6f", "status": 2},
            "extra_info": {"audio_length": 1200, "audio_format": "mp3"},
            "base_resp": {"status_code": 0, "status_msg": "success"}
        }"#;

        let response = T2aResponse::from_json(&serde_json::from_str(json).unwrap());
        assert_eq!(response.audio_hex(), Some("68656c6c6f"));
        assert_eq!(response.extra_info.unwrap().audio_length, Some(1200.0));
    }

    #[test]
    fn test_t2a_response_error_code_hides_audio() {
        let json = r#"{
            "data": {"audio": "00"},
            "base_resp": {"status_code": 1004, "status_msg": "authentication failed"}
        }"#;

        let response = T2aResponse::from_json(&serde_json::from_str(json).unwrap());
        assert_eq!(response.audio_hex(), None);
        assert_eq!(response.base_resp.unwrap().status_msg, "authentication failed");
    }

    #[test]
    fn test_t2a_response_missing_data() {
        let response = T2aResponse::from_json(&serde_json::json!({}));
        assert_eq!(response.audio_hex(), None);
    }

    #[test]
    fn test_t2a_response_fractional_metadata_keeps_audio() {
        let json = serde_json::json!({
            "data": {"audio": "68656c6c6f"},
            "extra_info": {"audio_length": 1.5}
        });

        let response = T2aResponse::from_json(&json);
        assert_eq!(response.audio_hex(), Some("68656c6c6f"));
        assert_eq!(response.extra_info.unwrap().audio_length, Some(1.5));
    }

    #[test]
    fn test_t2a_response_malformed_metadata_is_dropped() {
        let json = serde_json::json!({
            "data": {"audio": "00"},
            "extra_info": {"audio_length": "long"},
            "base_resp": {"status_code": "zero"}
        });

        let response = T2aResponse::from_json(&json);
        assert_eq!(response.audio_hex(), Some("00"));
        assert!(response.extra_info.is_none());
        assert!(response.base_resp.is_none());
    }

    #[test]
    fn test_t2a_response_base_resp_without_code() {
        let json = serde_json::json!({
            "data": {"audio": "68656c6c6f"},
            "base_resp": {"status_msg": "ok"}
        });

        let response = T2aResponse::from_json(&json);
        assert_eq!(response.audio_hex(), Some("68656c6c6f"));
    }

    #[test]
    fn test_flashsummary_request_defaults() {
        let json = serde_json::to_value(FlashSummaryRequest::new("Hello")).unwrap();

        assert_eq!(json["voice_id"], 1683);
        assert_eq!(json["to_lang"], "auto");
        assert_eq!(json["format"], "mp3");
        assert_eq!(json["speed_factor"], 1.0);
        assert_eq!(json["pitch_factor"], 0.0);
        assert_eq!(json["volume_change_dB"], 0.0);
        assert_eq!(json["emotion"], 17);
        assert_eq!(json["text"], "Hello");
        assert_eq!(json["code"], "");
    }

    #[test]
    fn test_flashsummary_request_from_settings() {
        let settings = VoiceSettings::new("42").with_speed(1.2).with_pitch(3).with_emotion("5");
        let request = FlashSummaryRequest::from_settings("Hi", &settings).unwrap();

        assert_eq!(request.voice_id, 42);
        assert_eq!(request.speed_factor, 1.2);
        assert_eq!(request.pitch_factor, 3.0);
        assert_eq!(request.volume_change_db, 0.0);
        assert_eq!(request.emotion, 5);
    }

    #[test]
    fn test_flashsummary_request_volume_to_db() {
        let settings = VoiceSettings::new("1").with_volume(10.0);
        let request = FlashSummaryRequest::from_settings("Hi", &settings).unwrap();

        assert!((request.volume_change_db - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_flashsummary_request_rejects_named_voice() {
        let settings = VoiceSettings::new("female-shaonv");
        let result = FlashSummaryRequest::from_settings("Hi", &settings);

        assert!(matches!(
            result.unwrap_err(),
            BackendError::InvalidRequest(_)
        ));
    }
}
