use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

/// Send `tracing` output to `path`. The terminal belongs to the TUI, so without a
/// log file nothing is installed and events are dropped.
pub fn init(path: Option<&Path>, verbose: bool) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Could not create log file {}", path.display()))?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}
