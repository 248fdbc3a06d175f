//! Track list of the current browsing selection and cursor navigation.

use rand::seq::SliceRandom;

use crate::catalog::TrackRef;
use crate::error::{PlayerError, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone)]
pub struct TrackQueue {
    tracks: Vec<TrackRef>,
}

impl TrackQueue {
    /// Take ownership of `tracks`, shuffling them once when requested.
    pub fn load(mut tracks: Vec<TrackRef>, shuffle: bool) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyQueue);
        }
        if shuffle {
            tracks.shuffle(&mut rand::rng());
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, index: usize) -> Option<&TrackRef> {
        self.tracks.get(index)
    }

    /// Move `cursor` one step.
    ///
    /// With `repeat` both ends wrap around. Without it the cursor always moves
    /// forward by one, whatever the direction, and may land on `len()`, which
    /// ends the list.
    pub fn advance(&self, cursor: usize, direction: Direction, repeat: bool) -> usize {
        if !repeat {
            return cursor + 1;
        }
        wrap_index(cursor, direction, self.tracks.len())
    }
}

fn wrap_index(cursor: usize, direction: Direction, len: usize) -> usize {
    match direction {
        Direction::Forward if cursor + 1 >= len => 0,
        Direction::Forward => cursor + 1,
        Direction::Backward if cursor == 0 || cursor > len => len - 1,
        Direction::Backward => cursor - 1,
    }
}
