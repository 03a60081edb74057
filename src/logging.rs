//! File-backed `tracing` setup. The terminal belongs to the UI, so log lines
//! go to the file named in the config.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Filter from `level`, e.g. `info` or `four_in_a_row=debug`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(level)?)
}

/// Install the global subscriber. `RUST_LOG` wins over `config.level`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| LoggingError::Open {
            path: config.file.clone(),
            source: e,
        })?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
