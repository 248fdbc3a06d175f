//! Line editing on top of crossterm key events (raw mode).

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{LineEvent, LineSource};
use crate::error::Result;

/// Reads keys from the terminal and assembles them into lines.
///
/// The partially typed line survives timeouts, so a refresh of the playback
/// screen never eats what the user is typing.
#[derive(Debug, Default)]
pub struct TerminalInput {
    buffer: String,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn on_key(&mut self, key: KeyEvent) -> LineEvent {
        if key.kind != KeyEventKind::Press {
            return LineEvent::Pending(self.buffer.clone());
        }
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.buffer.clear();
                LineEvent::Interrupt
            }
            KeyCode::Enter => LineEvent::Line(std::mem::take(&mut self.buffer)),
            KeyCode::Backspace => {
                self.buffer.pop();
                LineEvent::Pending(self.buffer.clone())
            }
            KeyCode::Esc => {
                self.buffer.clear();
                LineEvent::Pending(String::new())
            }
            KeyCode::Char(c) if !c.is_control() => {
                self.buffer.push(c);
                LineEvent::Pending(self.buffer.clone())
            }
            _ => LineEvent::Pending(self.buffer.clone()),
        }
    }
}

impl LineSource for TerminalInput {
    fn read_line(&mut self, timeout: Option<Duration>) -> Result<LineEvent> {
        if let Some(t) = timeout {
            if !event::poll(t)? {
                return Ok(LineEvent::TimedOut);
            }
        }

        let event = match event::read()? {
            Event::Key(key) => self.on_key(key),
            // Resizes and the like only need a redraw.
            _ => LineEvent::Pending(self.buffer.clone()),
        };
        Ok(event)
    }

    fn pending(&self) -> &str {
        &self.buffer
    }
}
