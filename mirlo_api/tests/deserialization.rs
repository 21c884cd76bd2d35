use mirlo_api::types::{Artist, ListResponse, Response, TrackGroup};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_track_group_full() {
    let json = load_fixture("track_group.json");
    let resp: Response<TrackGroup> = serde_json::from_str(&json).unwrap();
    let tg = resp.result;

    assert_eq!(tg.id, 5);
    assert_eq!(tg.title, "First Light");
    assert_eq!(tg.artist_id, 12);
    assert!(!tg.published);
    assert_eq!(
        tg.release_date.unwrap().to_rfc3339(),
        "2023-03-01T00:00:00+00:00"
    );
    assert_eq!(tg.tracks.len(), 2);
    assert_eq!(tg.tracks[0].title, "Thaw");
    assert!(tg.tracks[0].is_preview);
    assert_eq!(tg.tracks[1].order, Some(2));
    assert_eq!(
        tg.cover_url(600),
        Some("https://cdn.mirlo.space/covers/5-600.webp")
    );

    let artist = tg.artist.as_ref().unwrap();
    assert_eq!(artist.name, "Hazel Quarry");
    assert_eq!(tg.release_path(artist), "/hazel-quarry/release/first-light");
}

#[test]
fn deserialize_track_group_list_with_sparse_fields() {
    let json = load_fixture("track_groups.json");
    let resp: ListResponse<TrackGroup> = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.total, Some(2));
    assert_eq!(resp.results.len(), 2);

    let untitled = &resp.results[1];
    assert!(untitled.is_untitled());
    assert!(untitled.artist.is_none());
    assert!(untitled.tracks.is_empty());
    assert!(untitled.cover.is_none());
}

#[test]
fn deserialize_artist_with_releases() {
    let json = load_fixture("artist.json");
    let resp: Response<Artist> = serde_json::from_str(&json).unwrap();
    let artist = resp.result;

    assert_eq!(artist.page_path(), "/hazel-quarry");
    assert_eq!(artist.track_groups.len(), 1);
    assert_eq!(
        artist.track_groups[0].release_path(&artist),
        "/hazel-quarry/release/first-light"
    );
}

#[test]
fn list_without_total() {
    let resp: ListResponse<TrackGroup> = serde_json::from_str(r#"{"results":[]}"#).unwrap();
    assert!(resp.results.is_empty());
    assert_eq!(resp.total, None);
}
