// Debug logging module for Pong
// Routes `tracing` output to a file when enabled via --debug, since the
// terminal itself is owned by the TUI

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

pub const LOG_FILE_PATH: &str = "/tmp/duopong-debug.log";

/// Initialize debug logging to file
///
/// # Behavior
/// - If enabled=false: no subscriber is installed and every `tracing` macro is a no-op
/// - If enabled=true: creates/truncates the log file and installs a plain-text subscriber
pub fn init(enabled: bool, path: &Path) -> Result<()> {
    if !enabled {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;

    tracing::info!("debug logging started, to monitor: tail -f {}", path.display());
    Ok(())
}
