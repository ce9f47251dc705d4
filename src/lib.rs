//! remote-tts-rs: Text-to-speech CLI for remote speech APIs.
//!
//! This crate sends text to either the MiniMax `t2a_v2` API or a self-hosted
//! flashsummary service and saves the returned mp3 audio to a local file.

pub mod backend;
pub mod cli;
pub mod config;
pub mod engine;
