//! Turn raw catalog entries into canonical track ids.

use crate::catalog::{TrackId, TrackRef};

/// Ids of tracks that can actually be streamed start with this prefix.
const STORE_PREFIX: char = 'T';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(TrackId),
    /// No identifier field at all.
    Unresolvable,
    /// An identifier exists but does not point into the store.
    NotInStore,
}

/// Pick the first identifier present (`storeId`, then `nid`, then `trackId`)
/// and check it against the store format.
pub fn resolve(track: &TrackRef) -> Resolution {
    let candidate = track
        .store_id
        .as_deref()
        .or(track.nid.as_deref())
        .or(track.track_id.as_deref());

    match candidate {
        None => Resolution::Unresolvable,
        Some(id) if id.starts_with(STORE_PREFIX) => Resolution::Resolved(TrackId::new(id)),
        Some(_) => Resolution::NotInStore,
    }
}
