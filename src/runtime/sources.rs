//! What the browse menu lists: playlists or stations.

use crate::catalog::{Catalog, Collection, LUCKY_STATION_ID, TrackRef};
use crate::config::SourceSetting;
use crate::error::Result;

pub trait TrackSource {
    /// Singular name used in the menu prompt.
    fn title(&self) -> &str;
    fn collections(&self, catalog: &dyn Catalog) -> Result<Vec<Collection>>;
    fn tracks(&self, catalog: &dyn Catalog, collection: &Collection) -> Result<Vec<TrackRef>>;
}

pub fn for_setting(setting: SourceSetting) -> Box<dyn TrackSource> {
    match setting {
        SourceSetting::Playlists => Box::new(PlaylistSource),
        SourceSetting::Stations => Box::new(StationSource),
    }
}

/// User playlists; each listing already carries its entries.
pub struct PlaylistSource;

impl TrackSource for PlaylistSource {
    fn title(&self) -> &str {
        "PlayList"
    }

    fn collections(&self, catalog: &dyn Catalog) -> Result<Vec<Collection>> {
        catalog.list_playlists()
    }

    fn tracks(&self, _catalog: &dyn Catalog, collection: &Collection) -> Result<Vec<TrackRef>> {
        Ok(collection.tracks.clone())
    }
}

/// Radio stations, plus the catalog's "I'm Feeling Lucky" station at the end.
pub struct StationSource;

impl TrackSource for StationSource {
    fn title(&self) -> &str {
        "Station"
    }

    fn collections(&self, catalog: &dyn Catalog) -> Result<Vec<Collection>> {
        let mut stations = catalog.list_stations()?;
        stations.push(Collection {
            id: LUCKY_STATION_ID.to_string(),
            name: "I'm Feeling Lucky".to_string(),
            tracks: Vec::new(),
        });
        Ok(stations)
    }

    fn tracks(&self, catalog: &dyn Catalog, collection: &Collection) -> Result<Vec<TrackRef>> {
        catalog.station_tracks(&collection.id)
    }
}
