//! `rodio` backed engine: one `Sink` per loaded file on the default output.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use super::PlaybackEngine;
use crate::error::{PlayerError, Result};

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open_default() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Engine(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when the stream is dropped, which would land on the TUI.
        stream.log_on_drop(false);

        Ok(Self { stream, sink: None })
    }
}

impl PlaybackEngine for RodioEngine {
    fn load_source(&mut self, path: &Path) -> Result<()> {
        self.stop();

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlayerError::Engine(format!("failed to decode {:?}: {e}", path)))?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        debug!("Loaded {:?}", path);

        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn elapsed_millis(&self) -> u64 {
        self.sink
            .as_ref()
            .map_or(0, |s| s.get_pos().as_millis() as u64)
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_none_or(|s| s.empty())
    }
}
