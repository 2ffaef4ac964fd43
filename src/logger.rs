//! Logging setup.
//!
//! Wires the `log` facade to a `fern` dispatcher writing to stderr and,
//! when configured, to a log file. A no-op when logging is disabled.

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Initialize global logging from configuration.
///
/// Must be called at most once per process; `fern` rejects a second
/// `apply`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Info)
        .chain(std::io::stderr());

    if let Some(path) = &config.file {
        let file = fern::log_file(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().context("Failed to install logger")?;
    Ok(())
}
