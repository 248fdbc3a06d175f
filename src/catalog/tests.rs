use super::*;
use crate::testing::FakeCatalog;

fn creds() -> Credentials {
    Credentials {
        email: "me@example.com".into(),
        secret: "hunter2".into(),
    }
}

#[test]
fn track_ref_reads_only_identifier_fields() {
    let json = r#"[
        {"storeId": "Tabc", "title": "ignored", "position": 3},
        {"nid": "n1", "trackId": "t1"},
        {}
    ]"#;
    let refs: Vec<TrackRef> = serde_json::from_str(json).unwrap();
    assert_eq!(refs[0].store_id.as_deref(), Some("Tabc"));
    assert_eq!(refs[0].nid, None);
    assert_eq!(refs[1].nid.as_deref(), Some("n1"));
    assert_eq!(refs[1].track_id.as_deref(), Some("t1"));
    assert_eq!(refs[2], TrackRef::default());
}

#[test]
fn metadata_accepts_duration_as_number_or_string() {
    let m: Metadata = serde_json::from_str(
        r#"{"title": "Song", "album": "LP", "artist": "Band", "durationMillis": 215000}"#,
    )
    .unwrap();
    assert_eq!(m.duration_ms, Some(215_000));
    assert_eq!(m.title.as_deref(), Some("Song"));

    let m: Metadata = serde_json::from_str(r#"{"durationMillis": "3000"}"#).unwrap();
    assert_eq!(m.duration_ms, Some(3000));
    assert_eq!(m.artist, None);

    let m: Metadata = serde_json::from_str(r#"{"title": "No length"}"#).unwrap();
    assert_eq!(m.duration_ms, None);

    let m: Metadata = serde_json::from_str(r#"{"durationMillis": null}"#).unwrap();
    assert_eq!(m.duration_ms, None);
}

#[test]
fn metadata_rejects_non_numeric_duration() {
    assert!(serde_json::from_str::<Metadata>(r#"{"durationMillis": "long"}"#).is_err());
}

#[test]
fn collection_tracks_default_to_empty() {
    let c: Vec<Collection> =
        serde_json::from_str(r#"[{"id": "s1", "name": "Jazz"}]"#).unwrap();
    assert_eq!(c[0].name, "Jazz");
    assert!(c[0].tracks.is_empty());

    let c: Collection = serde_json::from_str(
        r#"{"id": "p1", "name": "Mix", "tracks": [{"storeId": "T1"}, {"nid": "x"}]}"#,
    )
    .unwrap();
    assert_eq!(c.tracks.len(), 2);
}

#[test]
fn login_succeeds_on_a_later_attempt() {
    let mut catalog = FakeCatalog::new().rejecting_logins(1);
    login(&mut catalog, &creds(), 3).unwrap();
    assert_eq!(catalog.auth_calls, 2);
}

#[test]
fn login_gives_up_after_the_attempt_budget() {
    let mut catalog = FakeCatalog::new().rejecting_logins(10);
    let err = login(&mut catalog, &creds(), 3).unwrap_err();
    assert!(matches!(err, PlayerError::AuthFailure));
    assert_eq!(catalog.auth_calls, 3);
    assert_eq!(err.to_string(), "Credentials weren't accepted.");
}

#[test]
fn login_always_tries_at_least_once() {
    let mut catalog = FakeCatalog::new();
    login(&mut catalog, &creds(), 0).unwrap();
    assert_eq!(catalog.auth_calls, 1);
}

#[test]
fn credentials_debug_hides_the_secret() {
    let shown = format!("{:?}", creds());
    assert!(shown.contains("me@example.com"));
    assert!(!shown.contains("hunter2"));
}
