//! Screens shown by the player and their text layout.
//!
//! `Ui` is what the session and the browse loop talk to. The text helpers
//! here are shared by the ratatui front end in `ui::terminal`.

use crate::catalog::Metadata;
use crate::error::Result;

mod terminal;

pub use terminal::TerminalUi;

/// Playback keys and what they do, in legend order.
pub const COMMANDS: [(&str, &str); 6] = [
    ("q", "stop and quit"),
    ("p", "pause and resume"),
    ("f", "go to next track"),
    ("b", "back to previous track"),
    ("r", "restart current track"),
    ("s", "back to menu"),
];

pub trait Ui {
    /// Replace the current screen and draw it.
    fn show(&mut self, screen: Screen) -> Result<()>;
    /// Redraw the prompt with the text typed so far.
    fn echo(&mut self, pending: &str) -> Result<()>;
    /// Surface a recoverable problem to the user.
    fn warn(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login(LoginView),
    Menu(MenuView),
    Playback(PlaybackView),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub field: LoginField,
    /// Already entered email, shown while asking for the password.
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub entries: Vec<String>,
}

impl MenuView {
    pub fn prompt(&self) -> String {
        format!("Select {} (Input Number)", self.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackView {
    pub metadata: Metadata,
    pub elapsed_ms: u64,
    pub width: usize,
    pub paused: bool,
}

impl PlaybackView {
    pub fn info_lines(&self) -> Vec<String> {
        let m = &self.metadata;
        vec![
            format!("Title: {}", m.title.as_deref().unwrap_or("-")),
            format!("Album: {}", m.album.as_deref().unwrap_or("-")),
            format!("Artist: {}", m.artist.as_deref().unwrap_or("-")),
            format!(
                "Length: {}",
                m.duration_ms.map_or_else(|| "-".to_string(), format_length)
            ),
        ]
    }

    pub fn progress_lines(&self) -> Vec<String> {
        let Some(duration) = self.metadata.duration_ms else {
            return vec![
                "Remaining play time: - [s]".to_string(),
                format!(" {:.2} [s]", self.elapsed_ms as f64 / 1000.0),
            ];
        };

        vec![
            format!(
                "Remaining play time: {:.2} [s]",
                remaining_secs(self.elapsed_ms, duration)
            ),
            format!(
                " {:.2}% |{}| {:.2}/{} [s]",
                percent(self.elapsed_ms, duration),
                progress_bar(self.elapsed_ms, duration, self.width),
                self.elapsed_ms as f64 / 1000.0,
                duration as f64 / 1000.0
            ),
        ]
    }
}

/// Format a track length as `XmYs`.
pub fn format_length(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}m{}s", secs / 60, secs % 60)
}

/// Played share of the track, in percent, clamped to `0..=100`.
pub fn percent(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 100.0;
    }
    let p = elapsed_ms as f64 / duration_ms as f64 * 100.0;
    p.clamp(0.0, 100.0)
}

pub fn remaining_secs(elapsed_ms: u64, duration_ms: u64) -> f64 {
    duration_ms.saturating_sub(elapsed_ms) as f64 / 1000.0
}

/// A bar of exactly `width` cells, filled proportionally with `█`.
pub fn progress_bar(elapsed_ms: u64, duration_ms: u64, width: usize) -> String {
    let filled = ((width as f64) * percent(elapsed_ms, duration_ms) / 100.0) as usize;
    let filled = filled.min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&" ".repeat(width - filled));
    bar
}

pub fn legend_lines() -> Vec<String> {
    COMMANDS
        .iter()
        .map(|(key, what)| format!("'{}': {}", key, what))
        .collect()
}

pub fn menu_lines(menu: &MenuView) -> Vec<String> {
    menu.entries
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}: {}", i, name))
        .collect()
}
