//! remote-tts-rs CLI entry point.

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap::error::ErrorKind;
use remote_tts_rs::backend::{Backend, Provider, create_backend};
use remote_tts_rs::cli::Args;
use remote_tts_rs::config::{Config, MiniMaxConfig};
use remote_tts_rs::engine::TTSEngine;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Argument errors exit with status 1
            let _ = e.print();
            process::exit(1);
        }
    };

    let config = Config {
        minimax: MiniMaxConfig::from_env(),
        ..Config::default()
    };
    let backend = create_backend(Provider::MiniMax, &config, &args.token)
        .context("Failed to create MiniMax backend")?;
    let provider = backend.provider();
    let engine = TTSEngine::new(backend);

    let saved = engine
        .synthesize_to_file(&args.text, &args.voice_settings(), &args.output)
        .context("Failed to synthesize speech")?;

    if !saved {
        bail!("Speech synthesis failed");
    }

    println!("Audio saved to: {} ({})", args.output.display(), provider.name());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
