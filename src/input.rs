//! Typed commands from timed line input.
//!
//! `CommandPoller` waits for one line from a `LineSource`, bounded by the
//! remaining play time and the display interval, and classifies it. The
//! deadline is fixed when `poll` starts, so keystrokes that merely edit the
//! pending line never extend the wait.

use std::time::{Duration, Instant};

use crate::error::Result;

mod terminal;

pub use terminal::TerminalInput;

const QUIT_TOKENS: [&str; 3] = ["q", "quit", "exit"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    PauseToggle,
    Next,
    Previous,
    Restart,
    BackToMenu,
    /// Nothing arrived before the deadline.
    Timeout,
    /// Input arrived but means nothing here.
    None,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Quit,
    Select(usize),
    Invalid,
}

/// What a `LineSource` saw while waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A submitted line (without the line terminator).
    Line(String),
    /// The pending, not yet submitted text changed (or should be redrawn).
    Pending(String),
    /// The user asked to stop the program (e.g. Ctrl-C).
    Interrupt,
    TimedOut,
}

pub trait LineSource {
    /// Wait for the next event, at most `timeout` (forever when `None`).
    fn read_line(&mut self, timeout: Option<Duration>) -> Result<LineEvent>;

    /// Text typed so far but not yet submitted.
    fn pending(&self) -> &str {
        ""
    }
}

pub fn is_quit(token: &str) -> bool {
    QUIT_TOKENS.contains(&token)
}

/// Classify a line typed on the playback screen.
pub fn classify(line: &str) -> Command {
    let token = line.trim();
    if is_quit(token) {
        return Command::Quit;
    }
    match token {
        "p" => Command::PauseToggle,
        "f" => Command::Next,
        "b" => Command::Previous,
        "r" => Command::Restart,
        "s" => Command::BackToMenu,
        _ => Command::None,
    }
}

/// Classify a line typed on a menu offering entries `0..=max`.
pub fn classify_menu(line: &str, max: usize) -> MenuInput {
    let token = line.trim();
    if is_quit(token) {
        return MenuInput::Quit;
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return MenuInput::Invalid;
    }
    match token.parse::<usize>() {
        Ok(n) if n <= max => MenuInput::Select(n),
        _ => MenuInput::Invalid,
    }
}

/// Callback used to show the pending line while the user types.
pub type Echo<'a> = dyn FnMut(&str) -> Result<()> + 'a;

pub struct CommandPoller<L> {
    source: L,
    interval: Duration,
}

impl<L: LineSource> CommandPoller<L> {
    pub fn new(source: L, interval: Duration) -> Self {
        Self { source, interval }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }

    /// Wait for a playback command.
    ///
    /// While `paused` there is no deadline. Otherwise the wait is bounded by
    /// `min(remaining_ms, interval)`, or by the interval alone when the
    /// remaining time is unknown, and `Timeout` is returned once it expires.
    pub fn poll(
        &mut self,
        remaining_ms: Option<u64>,
        paused: bool,
        echo: &mut Echo<'_>,
    ) -> Result<Command> {
        let deadline = if paused {
            None
        } else {
            let bound = remaining_ms
                .map(Duration::from_millis)
                .map_or(self.interval, |r| r.min(self.interval));
            Some(Instant::now() + bound)
        };
        echo(self.source.pending())?;

        loop {
            let timeout = deadline.map(|d| d.saturating_duration_since(Instant::now()));
            match self.source.read_line(timeout)? {
                LineEvent::Line(line) => return Ok(classify(&line)),
                LineEvent::Interrupt => return Ok(Command::Quit),
                LineEvent::Pending(pending) => echo(&pending)?,
                LineEvent::TimedOut => {
                    // Only trust the deadline, never an early wake-up.
                    if let Some(d) = deadline {
                        if Instant::now() >= d {
                            return Ok(Command::Timeout);
                        }
                    }
                }
            }
        }
    }

    /// Block until a full line is submitted. `None` on interrupt.
    pub fn read_text(&mut self, echo: &mut Echo<'_>) -> Result<Option<String>> {
        echo(self.source.pending())?;
        loop {
            match self.source.read_line(None)? {
                LineEvent::Line(line) => return Ok(Some(line)),
                LineEvent::Interrupt => return Ok(None),
                LineEvent::Pending(pending) => echo(&pending)?,
                LineEvent::TimedOut => {}
            }
        }
    }

    /// Block until a menu choice in `0..=max` or a quit request.
    pub fn read_menu(&mut self, max: usize, echo: &mut Echo<'_>) -> Result<MenuInput> {
        match self.read_text(echo)? {
            Some(line) => Ok(classify_menu(&line, max)),
            None => Ok(MenuInput::Quit),
        }
    }
}
