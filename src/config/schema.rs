use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/gpmctl/config.toml` or `~/.config/gpmctl/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `GPMCTL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub browse: BrowseSettings,
    pub catalog: CatalogSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Screen refresh interval while playing (seconds). Negative values are
    /// taken as their absolute value.
    pub interval_secs: f64,
    /// Width of the progress bar in cells.
    pub width: usize,
    /// Shuffle every track list once when it is loaded.
    pub shuffle: bool,
    /// Wrap around at both ends of the track list.
    pub repeat: bool,
    /// Replay the current track when it ends.
    pub loop_track: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            interval_secs: 3.0,
            width: 50,
            shuffle: false,
            repeat: false,
            loop_track: false,
        }
    }
}

impl PlaybackSettings {
    /// Refresh interval as a `Duration`. Out-of-range values fall back to the default.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.interval_secs.abs())
            .unwrap_or_else(|_| Duration::from_secs(3))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrowseSettings {
    /// Which browse menu to open when no mode is given on the command line.
    pub source: SourceSetting,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceSetting {
    #[serde(alias = "playlist", alias = "play-list")]
    Playlists,
    #[default]
    #[serde(alias = "station", alias = "radio")]
    Stations,
}

impl SourceSetting {
    /// Parse the command-line mode argument (`playlists` / `stations`).
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.trim().to_ascii_lowercase().as_str() {
            "playlists" | "playlist" => Some(Self::Playlists),
            "stations" | "station" | "radio" => Some(Self::Stations),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Base URL of the catalog REST API.
    pub base_url: String,
    /// Global timeout for a single HTTP request (seconds).
    pub timeout_secs: u64,
    /// How many times the same credentials are tried before giving up.
    pub login_attempts: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
            login_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file path. Defaults to `$XDG_STATE_HOME/gpmctl/gpmctl.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
