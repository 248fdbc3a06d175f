//! In-memory doubles for the catalog, engine, terminal and screen.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{Catalog, Collection, Metadata, TrackId, TrackRef};
use crate::engine::PlaybackEngine;
use crate::error::{PlayerError, Result};
use crate::input::{LineEvent, LineSource};
use crate::ui::{Screen, Ui};

const STREAM_SCHEME: &str = "mem://";

pub fn store_track(id: &str) -> TrackRef {
    TrackRef {
        store_id: Some(id.to_string()),
        ..TrackRef::default()
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    durations: HashMap<String, u64>,
    failing_metadata: HashSet<String>,
    failing_stream: HashSet<String>,
    failing_download: HashSet<String>,
    playlists: Vec<Collection>,
    stations: Vec<Collection>,
    station_tracks: HashMap<String, Vec<TrackRef>>,
    /// Number of sign-in attempts rejected before one is accepted.
    reject_logins: u32,
    pub auth_calls: u32,
    pub logged_out: bool,
    pub metadata_calls: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, id: &str, duration_ms: u64) -> Self {
        self.durations.insert(id.to_string(), duration_ms);
        self
    }

    pub fn failing_metadata(mut self, id: &str) -> Self {
        self.failing_metadata.insert(id.to_string());
        self
    }

    pub fn failing_stream(mut self, id: &str) -> Self {
        self.failing_stream.insert(id.to_string());
        self
    }

    pub fn failing_download(mut self, id: &str) -> Self {
        self.failing_download.insert(id.to_string());
        self
    }

    pub fn with_playlist(mut self, id: &str, name: &str, tracks: Vec<TrackRef>) -> Self {
        self.playlists.push(Collection {
            id: id.to_string(),
            name: name.to_string(),
            tracks,
        });
        self
    }

    pub fn with_station(mut self, id: &str, name: &str, tracks: Vec<TrackRef>) -> Self {
        self.stations.push(Collection {
            id: id.to_string(),
            name: name.to_string(),
            tracks: Vec::new(),
        });
        self.station_tracks.insert(id.to_string(), tracks);
        self
    }

    pub fn with_station_tracks(mut self, id: &str, tracks: Vec<TrackRef>) -> Self {
        self.station_tracks.insert(id.to_string(), tracks);
        self
    }

    pub fn rejecting_logins(mut self, count: u32) -> Self {
        self.reject_logins = count;
        self
    }

    pub fn content_of(&self, id: &str) -> Vec<u8> {
        format!("audio:{id}").into_bytes()
    }

    pub fn metadata_calls_for(&self, id: &str) -> usize {
        self.metadata_calls
            .borrow()
            .iter()
            .filter(|c| c.as_str() == id)
            .count()
    }
}

impl Catalog for FakeCatalog {
    fn authenticate(&mut self, _email: &str, _secret: &str) -> Result<bool> {
        self.auth_calls += 1;
        Ok(self.auth_calls > self.reject_logins)
    }

    fn logout(&mut self) {
        self.logged_out = true;
    }

    fn list_playlists(&self) -> Result<Vec<Collection>> {
        Ok(self.playlists.clone())
    }

    fn list_stations(&self) -> Result<Vec<Collection>> {
        Ok(self.stations.clone())
    }

    fn station_tracks(&self, station_id: &str) -> Result<Vec<TrackRef>> {
        self.station_tracks
            .get(station_id)
            .cloned()
            .ok_or_else(|| PlayerError::Catalog(format!("unknown station {station_id}")))
    }

    fn get_metadata(&self, id: &TrackId) -> Result<Metadata> {
        self.metadata_calls.borrow_mut().push(id.to_string());
        if self.failing_metadata.contains(id.as_str()) {
            return Err(PlayerError::Catalog("metadata service down".into()));
        }
        let duration = self
            .durations
            .get(id.as_str())
            .ok_or_else(|| PlayerError::Catalog(format!("unknown track {id}")))?;
        Ok(Metadata {
            title: Some(format!("Title {id}")),
            album: Some("Album".into()),
            artist: Some("Artist".into()),
            duration_ms: Some(*duration),
        })
    }

    fn get_stream_location(&self, id: &TrackId) -> Result<String> {
        if self.failing_stream.contains(id.as_str()) {
            return Err(PlayerError::Catalog("no stream".into()));
        }
        Ok(format!("{STREAM_SCHEME}{id}"))
    }

    fn download(&self, url: &str, out: &mut dyn Write) -> Result<u64> {
        let id = url.strip_prefix(STREAM_SCHEME).unwrap_or(url);
        let content = self.content_of(id);
        if self.failing_download.contains(id) {
            out.write_all(&content[..content.len() / 2])?;
            return Err(PlayerError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset",
            )));
        }
        out.write_all(&content)?;
        Ok(content.len() as u64)
    }
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    pub loaded: Vec<PathBuf>,
    /// Content of each file at the moment it was loaded.
    pub loaded_content: Vec<Vec<u8>>,
    pub plays: usize,
    pub pauses: usize,
    pub stops: usize,
    pub elapsed_ms: u64,
    pub finished: bool,
    pub fail_load: bool,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackEngine for FakeEngine {
    fn load_source(&mut self, path: &Path) -> Result<()> {
        if self.fail_load {
            return Err(PlayerError::Engine("unsupported format".into()));
        }
        self.loaded.push(path.to_path_buf());
        self.loaded_content.push(std::fs::read(path)?);
        Ok(())
    }

    fn play(&mut self) {
        self.plays += 1;
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn stop(&mut self) {
        self.stops += 1;
    }

    fn elapsed_millis(&self) -> u64 {
        self.elapsed_ms
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Line(String),
    Pending(String),
    Interrupt,
    /// Nothing typed: sleeps for the whole timeout.
    Idle,
}

/// Replays `Step`s. Running out of steps, or idling without a timeout, is an
/// error so a misbehaving test fails instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    steps: VecDeque<Step>,
    pending: String,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            pending: String::new(),
        }
    }

    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| Step::Line(l.to_string())))
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, timeout: Option<Duration>) -> Result<LineEvent> {
        let Some(step) = self.steps.pop_front() else {
            return Err(PlayerError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input script exhausted",
            )));
        };
        match step {
            Step::Line(line) => {
                self.pending.clear();
                Ok(LineEvent::Line(line))
            }
            Step::Pending(text) => {
                self.pending = text.clone();
                Ok(LineEvent::Pending(text))
            }
            Step::Interrupt => Ok(LineEvent::Interrupt),
            Step::Idle => match timeout {
                Some(t) => {
                    std::thread::sleep(t);
                    Ok(LineEvent::TimedOut)
                }
                None => Err(PlayerError::Io(io::Error::new(
                    io::ErrorKind::WouldBlock,
                    "idle without a timeout would block forever",
                ))),
            },
        }
    }

    fn pending(&self) -> &str {
        &self.pending
    }
}

#[derive(Debug, Default)]
pub struct RecordingUi {
    pub screens: Vec<Screen>,
    pub warnings: Vec<String>,
    pub echoes: Vec<String>,
    pub fail_playback: bool,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playback_screens(&self) -> usize {
        self.screens
            .iter()
            .filter(|s| matches!(s, Screen::Playback(_)))
            .count()
    }

    pub fn warned(&self, needle: &str) -> usize {
        self.warnings.iter().filter(|w| w.contains(needle)).count()
    }
}

impl Ui for RecordingUi {
    fn show(&mut self, screen: Screen) -> Result<()> {
        if self.fail_playback && matches!(screen, Screen::Playback(_)) {
            return Err(PlayerError::Io(io::Error::other("terminal gone")));
        }
        self.screens.push(screen);
        Ok(())
    }

    fn echo(&mut self, pending: &str) -> Result<()> {
        self.echoes.push(pending.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
