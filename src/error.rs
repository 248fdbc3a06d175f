//! Error type shared by the catalog, engine and session layers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Error, Debug)]
pub enum PlayerError {
    /// Credentials rejected after the whole retry budget.
    #[error("Credentials weren't accepted.")]
    AuthFailure,

    /// A browsing selection produced no tracks.
    #[error("the selected collection has no tracks")]
    EmptyQueue,

    /// The stream location or content of a track could not be obtained.
    #[error("failed to fetch track: {0}")]
    FetchFailed(String),

    /// The catalog answered with something unusable.
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("playback engine error: {0}")]
    Engine(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
