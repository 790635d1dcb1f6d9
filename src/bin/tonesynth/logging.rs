//! Log setup. The TUI owns the terminal, so records go to a file.

use std::fs::File;
use std::path::PathBuf;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use env_logger::{Env, Target};

const LOG_FILE: &str = "tonesynth.log";

/// Install `env_logger`, filtered by `RUST_LOG` (default `warn`). Returns the
/// log file path.
pub fn init() -> EyreResult<PathBuf> {
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(path)
}
