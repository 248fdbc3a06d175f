//! File logging. The terminal belongs to the UI, so nothing is written to stderr.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;
use crate::error::{PlayerError, Result};

/// Default log file under `$XDG_STATE_HOME/gpmctl/` or `~/.local/state/gpmctl/`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = match env::var_os("XDG_STATE_HOME") {
        Some(xdg) => Some(PathBuf::from(xdg)),
        None => env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state")),
    };
    state_home.map(|d| d.join("gpmctl").join("gpmctl.log"))
}

/// Install the global subscriber. Returns the file being written to.
pub fn init(settings: &LogSettings) -> Result<PathBuf> {
    let path = settings
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or_else(|| PlayerError::Io(std::io::Error::other("no log directory (HOME unset)")))?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| PlayerError::Io(std::io::Error::other(e.to_string())))?;

    tracing::info!("gpmctl {} starting", env!("CARGO_PKG_VERSION"));
    Ok(path)
}
