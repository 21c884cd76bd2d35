use mirlo_api::types::{Artist, Track, TrackGroup};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct ArtistRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Page")]
    page: String,
    #[tabled(rename = "Releases")]
    releases: usize,
}

#[derive(Tabled)]
struct TrackGroupRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Artist")]
    artist: String,
    #[tabled(rename = "Page")]
    page: String,
    #[tabled(rename = "Tracks")]
    tracks: usize,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Released")]
    released: String,
}

#[derive(Tabled)]
struct TrackRow {
    #[tabled(rename = "#")]
    order: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Preview")]
    preview: String,
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

fn build_track_group_rows(
    track_groups: &[TrackGroup],
    artist: Option<&Artist>,
) -> Vec<TrackGroupRow> {
    track_groups
        .iter()
        .map(|tg| {
            let artist = tg.artist.as_ref().or(artist);
            TrackGroupRow {
                id: tg.id,
                title: if tg.is_untitled() {
                    "(untitled)".to_string()
                } else {
                    tg.title.clone()
                },
                artist: artist.map(|a| a.name.clone()).unwrap_or_else(|| "-".to_string()),
                page: artist
                    .map(|a| tg.release_path(a))
                    .unwrap_or_else(|| "-".to_string()),
                tracks: tg.tracks.len(),
                published: yes_no(tg.published),
                released: tg
                    .release_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect()
}

fn build_track_rows(tracks: &[Track]) -> Vec<TrackRow> {
    tracks
        .iter()
        .map(|t| TrackRow {
            order: t.order.map(|o| o.to_string()).unwrap_or_default(),
            title: t.title.clone(),
            preview: yes_no(t.is_preview),
        })
        .collect()
}

pub fn print_artist_table(artist: &Artist) {
    let row = ArtistRow {
        id: artist.id,
        name: artist.name.clone(),
        page: artist.page_path(),
        releases: artist.track_groups.len(),
    };
    println!("{}", Table::new([row]));
}

pub fn print_track_groups_table(track_groups: &[TrackGroup], artist: Option<&Artist>) {
    println!("{}", Table::new(build_track_group_rows(track_groups, artist)));
}

pub fn print_tracks_table(tracks: &[Track]) {
    println!("{}", Table::new(build_track_rows(tracks)));
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn track_group(value: serde_json::Value) -> TrackGroup {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rows_use_embedded_artist() {
        let tg = track_group(json!({
            "id": 5, "title": "First Light", "artistId": 12, "published": true,
            "releaseDate": "2023-03-01T00:00:00Z", "urlSlug": "first-light",
            "artist": { "id": 12, "name": "Hazel", "urlSlug": "hazel", "userId": 4 },
            "tracks": [{ "id": 50, "title": "Thaw", "order": 1, "trackGroupId": 5 }]
        }));
        let rows = build_track_group_rows(&[tg], None);
        assert_eq!(rows[0].artist, "Hazel");
        assert_eq!(rows[0].page, "/hazel/release/first-light");
        assert_eq!(rows[0].tracks, 1);
        assert_eq!(rows[0].published, "yes");
        assert_eq!(rows[0].released, "2023-03-01");
    }

    #[test]
    fn rows_fall_back_to_given_artist_and_mark_untitled() {
        let artist: Artist = serde_json::from_value(json!({
            "id": 12, "name": "Hazel", "userId": 4
        }))
        .unwrap();
        let tg = track_group(json!({ "id": 9, "title": " ", "artistId": 12 }));
        let rows = build_track_group_rows(&[tg], Some(&artist));
        assert_eq!(rows[0].title, "(untitled)");
        assert_eq!(rows[0].page, "/12/release/9");
        assert_eq!(rows[0].released, "-");
    }

    #[test]
    fn rows_without_any_artist() {
        let tg = track_group(json!({ "id": 9, "title": "Solo", "artistId": 12 }));
        let rows = build_track_group_rows(&[tg], None);
        assert_eq!(rows[0].artist, "-");
        assert_eq!(rows[0].page, "-");
    }

    #[test]
    fn track_rows() {
        let tracks: Vec<Track> = serde_json::from_value(json!([
            { "id": 50, "title": "Thaw", "order": 1, "trackGroupId": 5, "isPreview": true },
            { "id": 51, "title": "Kettle", "trackGroupId": 5 }
        ]))
        .unwrap();
        let rows = build_track_rows(&tracks);
        assert_eq!(rows[0].order, "1");
        assert_eq!(rows[0].preview, "yes");
        assert_eq!(rows[1].order, "");
        assert_eq!(rows[1].preview, "no");
    }
}
