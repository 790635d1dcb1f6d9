//! tonesynth - terminal tone generator
//!
//! Run with: cargo run -- --buffer-ms 100

mod app;
mod audio;
mod keymap;
mod logging;
mod ui;

use app::App;
use clap::Parser;
use tonesynth::{
    config::{DEFAULT_BUFFER_MS, DEFAULT_SAMPLE_RATE, DEFAULT_VOLUME},
    synth::engine::DEFAULT_OCTAVE,
    SessionConfig,
};

/// Play sine tones from the computer keyboard.
#[derive(Debug, Parser)]
#[command(name = "tonesynth", version)]
struct Args {
    /// Output sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Output buffer length in milliseconds
    #[arg(long, default_value_t = DEFAULT_BUFFER_MS)]
    buffer_ms: u32,

    /// Starting octave (3 puts A at 220 Hz)
    #[arg(long, default_value_t = DEFAULT_OCTAVE, allow_hyphen_values = true)]
    octave: i32,

    /// Output volume, 0.0-1.0 on a logarithmic scale
    #[arg(long, default_value_t = DEFAULT_VOLUME)]
    volume: f32,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_path = logging::init()?;

    let config = SessionConfig::new()
        .sample_rate(args.sample_rate)
        .buffer_ms(args.buffer_ms)
        .octave(args.octave)
        .volume(args.volume);
    config.validate()?;

    log::info!("starting with {config:?}, logging to {}", log_path.display());

    App::start(config)?.run()
}
