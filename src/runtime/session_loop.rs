//! Browse, queue, play: the outer loop around `PlaybackSession`.

use tracing::{debug, info, warn};

use super::sources::TrackSource;
use crate::catalog::{Catalog, TrackRef};
use crate::config::PlaybackSettings;
use crate::error::Result;
use crate::input::{Command, CommandPoller, LineSource, MenuInput};
use crate::queue::{Direction, TrackQueue};
use crate::resolver::{Resolution, resolve};
use crate::session::{PlaybackSession, SessionContext, SessionOptions};
use crate::ui::{MenuView, Screen, Ui};

pub const NOT_IN_STORE: &str = "Track is not in the store.";
pub const ALL_NOT_IN_STORE: &str = "All tracks are not in the store.";
pub const NO_PLAYABLE: &str = "No playable tracks in this selection.";

/// Why the whole loop ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Quit while a track was playing.
    Quit,
    /// Quit from the browse menu.
    MenuClosed,
}

/// Why one pass over a queue ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QueueEnd {
    Quit,
    BackToMenu,
    /// The cursor ran past the last track.
    Exhausted,
    /// Every entry was skipped in a row.
    AllUnusable,
}

/// Show the menu until the user picks something or quits (`None`).
pub fn browse<L: LineSource>(
    source: &dyn TrackSource,
    catalog: &dyn Catalog,
    poller: &mut CommandPoller<L>,
    ui: &mut dyn Ui,
) -> Result<Option<Vec<TrackRef>>> {
    let collections = source.collections(catalog)?;
    if collections.is_empty() {
        warn!("Nothing to browse for {}", source.title());
        ui.warn(&format!("No {} available.", source.title()));
        return Ok(None);
    }

    let view = MenuView {
        title: source.title().to_string(),
        entries: collections.iter().map(|c| c.name.clone()).collect(),
    };
    let max = collections.len() - 1;

    loop {
        ui.show(Screen::Menu(view.clone()))?;
        let input = poller.read_menu(max, &mut |p: &str| ui.echo(p))?;
        match input {
            MenuInput::Quit => return Ok(None),
            MenuInput::Invalid => ui.warn(&format!("Enter a number from 0 to {max}.")),
            MenuInput::Select(n) => {
                let collection = &collections[n];
                info!("Selected {} {:?}", source.title(), collection.name);
                match source.tracks(catalog, collection) {
                    Ok(tracks) => return Ok(Some(tracks)),
                    Err(e) => {
                        warn!("Could not list {:?}: {}", collection.name, e);
                        ui.warn(&format!("Could not open {}: {e}", collection.name));
                    }
                }
            }
        }
    }
}

/// Walk `queue` from the top, one `PlaybackSession` per playable entry.
pub fn play_queue<L: LineSource>(
    queue: &TrackQueue,
    repeat: bool,
    options: SessionOptions,
    ctx: &mut SessionContext<'_, L>,
) -> Result<QueueEnd> {
    let len = queue.len();
    let mut cursor = 0;
    // Store misses since the last track that actually played.
    let mut skips = 0;
    // Consecutive entries of any kind that produced no playback.
    let mut misses = 0;

    while let Some(track) = queue.get(cursor) {
        match resolve(track) {
            Resolution::Unresolvable => {
                debug!("Entry {} has no identifier", cursor);
                misses += 1;
                if misses >= len {
                    ctx.ui.warn(NO_PLAYABLE);
                    return Ok(QueueEnd::AllUnusable);
                }
                cursor = queue.advance(cursor, Direction::Forward, repeat);
            }
            Resolution::NotInStore => {
                skips += 1;
                misses += 1;
                ctx.ui.warn(NOT_IN_STORE);
                if skips >= len {
                    warn!("All {} tracks are outside the store", len);
                    ctx.ui.warn(ALL_NOT_IN_STORE);
                    return Ok(QueueEnd::AllUnusable);
                }
                if misses >= len {
                    ctx.ui.warn(NO_PLAYABLE);
                    return Ok(QueueEnd::AllUnusable);
                }
                // Store misses always wrap, repeat or not.
                cursor = queue.advance(cursor, Direction::Forward, true);
            }
            Resolution::Resolved(id) => {
                let outcome = PlaybackSession::new(id, options).run(ctx)?;
                if outcome.started {
                    skips = 0;
                    misses = 0;
                } else {
                    misses += 1;
                    if misses >= len {
                        ctx.ui.warn(NO_PLAYABLE);
                        return Ok(QueueEnd::AllUnusable);
                    }
                }

                cursor = match outcome.command {
                    Command::Quit => return Ok(QueueEnd::Quit),
                    Command::BackToMenu => return Ok(QueueEnd::BackToMenu),
                    Command::Previous => queue.advance(cursor, Direction::Backward, repeat),
                    Command::Restart => cursor,
                    _ => queue.advance(cursor, Direction::Forward, repeat),
                };
            }
        }
    }

    debug!("Queue of {} exhausted", len);
    Ok(QueueEnd::Exhausted)
}

/// Browse and play until the user quits.
pub fn run<L: LineSource>(
    source: &dyn TrackSource,
    settings: &PlaybackSettings,
    ctx: &mut SessionContext<'_, L>,
) -> Result<SessionEnd> {
    let options = SessionOptions {
        width: settings.width,
        loop_track: settings.loop_track,
    };

    loop {
        let Some(tracks) = browse(source, ctx.catalog, ctx.poller, ctx.ui)? else {
            return Ok(SessionEnd::MenuClosed);
        };

        let queue = match TrackQueue::load(tracks, settings.shuffle) {
            Ok(queue) => queue,
            Err(e) => {
                warn!("{}", e);
                ctx.ui.warn("That selection has no tracks.");
                continue;
            }
        };
        info!("Queued {} tracks", queue.len());

        match play_queue(&queue, settings.repeat, options, ctx)? {
            QueueEnd::Quit => return Ok(SessionEnd::Quit),
            end => debug!("Back to the menu after {:?}", end),
        }
    }
}
