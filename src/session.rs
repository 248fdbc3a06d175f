//! Playback of a single track, from download to the command that ends it.
//!
//! A session goes `Starting -> Playing <-> Paused` and ends in one of
//! `Advancing`, `Finished` or `Aborted`. The engine is stopped and the audio
//! file released exactly once on every way out of `Playing`/`Paused`,
//! including errors.

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Metadata, TrackId};
use crate::engine::PlaybackEngine;
use crate::error::Result;
use crate::fetcher::{Fetched, StreamFetcher};
use crate::input::{Command, CommandPoller, LineSource};
use crate::ui::{PlaybackView, Screen, Ui};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Starting,
    Playing,
    Paused,
    /// Left because of a user command (or a track that could not start).
    Advancing,
    /// The track played to its end.
    Finished,
    /// The user asked to quit.
    Aborted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Progress bar width in cells.
    pub width: usize,
    /// Restart the same track at its end instead of moving on.
    pub loop_track: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// What the browse loop should do next: `Next`, `Previous`, `Restart`,
    /// `BackToMenu` or `Quit`.
    pub command: Command,
    pub state: SessionState,
    /// False when the track never reached `Playing`.
    pub started: bool,
}

/// Everything a session borrows from the loop that runs it.
pub struct SessionContext<'a, L> {
    pub catalog: &'a dyn Catalog,
    pub fetcher: &'a StreamFetcher,
    pub engine: &'a mut dyn PlaybackEngine,
    pub poller: &'a mut CommandPoller<L>,
    pub ui: &'a mut dyn Ui,
}

#[derive(Debug)]
pub struct PlaybackSession {
    id: TrackId,
    options: SessionOptions,
    state: SessionState,
}

impl PlaybackSession {
    pub fn new(id: TrackId, options: SessionOptions) -> Self {
        Self {
            id,
            options,
            state: SessionState::Starting,
        }
    }

    /// Fetch, play and control the track until something ends it.
    pub fn run<L: LineSource>(&mut self, ctx: &mut SessionContext<'_, L>) -> Result<SessionOutcome> {
        self.state = SessionState::Starting;

        let Fetched {
            metadata,
            metadata_error,
            mut audio,
        } = match ctx.fetcher.fetch(ctx.catalog, &self.id) {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Skipping {}: {}", self.id, e);
                ctx.ui.warn(&format!("Could not fetch track: {e}"));
                return Ok(self.end(Command::Next, SessionState::Advancing));
            }
        };

        if let Some(e) = metadata_error {
            ctx.ui.warn(&format!("Track information unavailable: {e}"));
        }

        if let Err(e) = ctx.engine.load_source(audio.path()) {
            audio.release();
            warn!("Could not load {}: {}", self.id, e);
            ctx.ui.warn(&format!("Could not play track: {e}"));
            return Ok(self.end(Command::Next, SessionState::Advancing));
        }

        ctx.engine.play();
        self.state = SessionState::Playing;
        info!(
            "Playing {} ({})",
            self.id,
            metadata.title.as_deref().unwrap_or("untitled")
        );

        let result = self.drive(ctx, &metadata);

        ctx.engine.stop();
        audio.release();

        let command = result?;
        debug!("Session for {} ended with {:?} in {:?}", self.id, command, self.state);
        Ok(SessionOutcome {
            command,
            state: self.state,
            started: true,
        })
    }

    fn end(&mut self, command: Command, state: SessionState) -> SessionOutcome {
        self.state = state;
        SessionOutcome {
            command,
            state,
            started: false,
        }
    }

    fn drive<L: LineSource>(
        &mut self,
        ctx: &mut SessionContext<'_, L>,
        metadata: &Metadata,
    ) -> Result<Command> {
        let interval_ms = ctx.poller.interval_ms();

        loop {
            let paused = self.state == SessionState::Paused;
            let elapsed_ms = ctx.engine.elapsed_millis();
            ctx.ui.show(Screen::Playback(PlaybackView {
                metadata: metadata.clone(),
                elapsed_ms,
                width: self.options.width,
                paused,
            }))?;

            let remaining = metadata.duration_ms.map(|d| d.saturating_sub(elapsed_ms));
            let ui: &mut dyn Ui = &mut *ctx.ui;
            let command = ctx.poller.poll(remaining, paused, &mut |p: &str| ui.echo(p))?;

            match command {
                Command::Timeout => {
                    let at_end = match remaining {
                        Some(r) => r <= interval_ms || ctx.engine.is_finished(),
                        None => ctx.engine.is_finished(),
                    };
                    if at_end {
                        self.state = SessionState::Finished;
                        return Ok(if self.options.loop_track {
                            Command::Restart
                        } else {
                            Command::Next
                        });
                    }
                }
                Command::PauseToggle if paused => {
                    ctx.engine.play();
                    self.state = SessionState::Playing;
                }
                Command::PauseToggle => {
                    ctx.engine.pause();
                    self.state = SessionState::Paused;
                }
                Command::None => {}
                Command::Quit => {
                    self.state = SessionState::Aborted;
                    return Ok(Command::Quit);
                }
                Command::Next | Command::Previous | Command::Restart | Command::BackToMenu => {
                    self.state = SessionState::Advancing;
                    return Ok(command);
                }
            }
        }
    }
}
