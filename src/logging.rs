use std::fs::OpenOptions;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::config::Settings;

/// Route `log` output to the session log file. `RUST_LOG` still controls the
/// filter; the default is `info`.
pub fn init(settings: &Settings) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_path)
        .with_context(|| format!("failed to open log file {}", settings.log_path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialise logger")
}
