//! Materialize one track: fresh metadata plus its audio in a temp file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::catalog::{Catalog, Metadata, TrackId};
use crate::error::{PlayerError, Result};

/// A downloaded track on disk. Removed on `release` or drop, whichever comes first.
#[derive(Debug)]
pub struct AudioHandle {
    path: PathBuf,
    file: Option<NamedTempFile>,
}

impl AudioHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_released(&self) -> bool {
        self.file.is_none()
    }

    /// Close and delete the file. Returns `false` when it was already released.
    pub fn release(&mut self) -> bool {
        let Some(file) = self.file.take() else {
            return false;
        };
        if let Err(e) = file.close() {
            warn!("Failed to remove {:?}: {}", self.path, e);
        }
        debug!("Released {:?}", self.path);
        true
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug)]
pub struct Fetched {
    pub metadata: Metadata,
    /// Set when the metadata call failed and `metadata` is a placeholder.
    pub metadata_error: Option<PlayerError>,
    pub audio: AudioHandle,
}

#[derive(Debug, Clone, Default)]
pub struct StreamFetcher {
    temp_dir: Option<PathBuf>,
}

impl StreamFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep downloads under `dir` instead of the system temp directory.
    pub fn with_temp_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: Some(dir.into()),
        }
    }

    /// Fetch metadata and download the whole stream before returning.
    ///
    /// A metadata failure only degrades the result; a failure to locate or
    /// download the stream is `FetchFailed`.
    pub fn fetch(&self, catalog: &dyn Catalog, id: &TrackId) -> Result<Fetched> {
        let (metadata, metadata_error) = match catalog.get_metadata(id) {
            Ok(m) => (m, None),
            Err(e) => {
                warn!("Metadata for {} unavailable: {}", id, e);
                (Metadata::unavailable(), Some(e))
            }
        };

        let url = catalog
            .get_stream_location(id)
            .map_err(|e| PlayerError::FetchFailed(format!("no stream location for {id}: {e}")))?;

        let mut file = self.create_temp()?;
        let bytes = catalog
            .download(&url, &mut file)
            .and_then(|n| file.flush().map(|_| n).map_err(PlayerError::from))
            .map_err(|e| PlayerError::FetchFailed(format!("download of {id} failed: {e}")))?;
        debug!("Downloaded {} bytes for {} into {:?}", bytes, id, file.path());

        Ok(Fetched {
            metadata,
            metadata_error,
            audio: AudioHandle {
                path: file.path().to_path_buf(),
                file: Some(file),
            },
        })
    }

    fn create_temp(&self) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("gpmctl-");
        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }
}
