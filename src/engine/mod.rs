//! TTS Engine orchestrator.
//!
//! This module provides the engine that sits between the CLI and a
//! [`Backend`](crate::backend::Backend): it runs a synthesis and persists the
//! returned audio.

mod tts;

pub use tts::{TTSEngine, TTSError};
