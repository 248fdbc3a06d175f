//! Catalog service boundary.
//!
//! The player only needs a handful of calls from the remote catalog: sign in,
//! list what can be browsed, and turn a track id into metadata and a stream.
//! `Catalog` captures exactly that; `HttpCatalog` talks to a JSON REST API.

use std::io::Write;

use tracing::{info, warn};

use crate::error::{PlayerError, Result};

mod http;
mod model;

pub use http::HttpCatalog;
pub use model::*;

pub trait Catalog {
    /// Try one sign-in. `Ok(false)` means the credentials were rejected.
    fn authenticate(&mut self, email: &str, secret: &str) -> Result<bool>;
    fn logout(&mut self);
    fn list_playlists(&self) -> Result<Vec<Collection>>;
    fn list_stations(&self) -> Result<Vec<Collection>>;
    fn station_tracks(&self, station_id: &str) -> Result<Vec<TrackRef>>;
    fn get_metadata(&self, id: &TrackId) -> Result<Metadata>;
    fn get_stream_location(&self, id: &TrackId) -> Result<String>;
    /// Copy the whole body behind `url` into `out`, returning the byte count.
    fn download(&self, url: &str, out: &mut dyn Write) -> Result<u64>;
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Sign in with the same credentials up to `attempts` times, without backoff.
pub fn login(catalog: &mut dyn Catalog, credentials: &Credentials, attempts: u32) -> Result<()> {
    for attempt in 1..=attempts.max(1) {
        match catalog.authenticate(&credentials.email, &credentials.secret) {
            Ok(true) => {
                info!("Logged in as {} (attempt {})", credentials.email, attempt);
                return Ok(());
            }
            Ok(false) => warn!("Login attempt {} rejected", attempt),
            Err(e) => warn!("Login attempt {} failed: {}", attempt, e),
        }
    }
    Err(PlayerError::AuthFailure)
}

#[cfg(test)]
mod tests;
