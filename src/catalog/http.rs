//! Blocking JSON client for the catalog REST API.
//!
//! Endpoints (relative to `catalog.base_url`):
//! - `POST auth/login` `{email,password}` -> `{token}`
//! - `POST auth/logout`
//! - `GET playlists` -> `[{id,name,tracks}]`
//! - `GET stations` -> `[{id,name}]`
//! - `GET stations/{id}/tracks` -> `[TrackRef]`
//! - `GET tracks/{id}` -> `Metadata`
//! - `GET tracks/{id}/stream` -> `{url}`

use std::io::{self, Write};
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ureq::Agent;

use super::model::{Collection, Metadata, TrackId, TrackRef};
use super::Catalog;
use crate::config::CatalogSettings;
use crate::error::{PlayerError, Result};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct StreamResponse {
    url: String,
}

pub struct HttpCatalog {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalog {
    pub fn new(settings: &CatalogSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let mut request = self.agent.get(&url);
        if let Some(auth) = self.bearer() {
            request = request.header("Authorization", auth);
        }

        let mut response = request.call()?;
        let body = response.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Catalog for HttpCatalog {
    fn authenticate(&mut self, email: &str, secret: &str) -> Result<bool> {
        let body = serde_json::to_string(&LoginRequest {
            email,
            password: secret,
        })?;

        let result = self
            .agent
            .post(&self.endpoint("auth/login"))
            .header("Content-Type", "application/json")
            .send(body);

        match result {
            Ok(mut response) => {
                let text = response.body_mut().read_to_string()?;
                let login: LoginResponse = serde_json::from_str(&text)?;
                self.token = Some(login.token);
                Ok(true)
            }
            Err(ureq::Error::StatusCode(401 | 403)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn logout(&mut self) {
        let Some(auth) = self.bearer() else {
            return;
        };
        self.token = None;

        let result = self
            .agent
            .post(&self.endpoint("auth/logout"))
            .header("Authorization", auth)
            .send_empty();
        match result {
            Ok(_) => info!("Logged out"),
            Err(e) => debug!("Logout request failed: {}", e),
        }
    }

    fn list_playlists(&self) -> Result<Vec<Collection>> {
        self.get_json("playlists")
    }

    fn list_stations(&self) -> Result<Vec<Collection>> {
        self.get_json("stations")
    }

    fn station_tracks(&self, station_id: &str) -> Result<Vec<TrackRef>> {
        self.get_json(&format!("stations/{}/tracks", percent_encode(station_id)))
    }

    fn get_metadata(&self, id: &TrackId) -> Result<Metadata> {
        self.get_json(&format!("tracks/{}", percent_encode(id.as_str())))
    }

    fn get_stream_location(&self, id: &TrackId) -> Result<String> {
        let stream: StreamResponse =
            self.get_json(&format!("tracks/{}/stream", percent_encode(id.as_str())))?;
        stream_url(stream, id)
    }

    fn download(&self, url: &str, out: &mut dyn Write) -> Result<u64> {
        debug!("Downloading stream content");
        let mut response = self.agent.get(url).call()?;
        let mut reader = response.body_mut().as_reader();
        Ok(io::copy(&mut reader, out)?)
    }
}

/// Everything but RFC 3986 unreserved characters is escaped in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, SEGMENT).to_string()
}

fn stream_url(stream: StreamResponse, id: &TrackId) -> Result<String> {
    if stream.url.trim().is_empty() {
        return Err(PlayerError::Catalog(format!("empty stream location for {id}")));
    }
    Ok(stream.url)
}
