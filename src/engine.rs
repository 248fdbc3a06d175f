//! Playback engine boundary.
//!
//! The session drives the engine from a single thread and only through this
//! trait; decoding and output happen wherever the implementation puts them.

use std::path::Path;

use crate::error::Result;

mod sink;

pub use sink::RodioEngine;

pub trait PlaybackEngine {
    /// Replace the current source with the file at `path`, paused at 0.
    fn load_source(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Position within the current source. Only advances while playing.
    fn elapsed_millis(&self) -> u64;
    /// True when nothing is loaded or the source ran out of samples.
    fn is_finished(&self) -> bool;
}
