use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Artist, ArtistID};

pub type TrackGroupID = i64;
pub type TrackID = i64;

/// A release (album, EP, single) and its tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackGroup {
    pub id: TrackGroupID,
    #[serde(default)]
    pub title: String,
    pub about: Option<String>,
    pub artist_id: ArtistID,
    pub artist: Option<Artist>,
    #[serde(default)]
    pub published: bool,
    pub release_date: Option<DateTime<Utc>>,
    pub url_slug: Option<String>,
    pub cover: Option<Cover>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl TrackGroup {
    /// Site path of the release page, nested under the artist's page.
    pub fn release_path(&self, artist: &Artist) -> String {
        let slug = match &self.url_slug {
            Some(slug) if !slug.is_empty() => slug.to_lowercase(),
            _ => self.id.to_string(),
        };
        format!("{}/release/{}", artist.page_path(), slug)
    }

    /// URL of the cover image rendered at `size` pixels, if the API sent one.
    pub fn cover_url(&self, size: u32) -> Option<&str> {
        self.cover
            .as_ref()
            .and_then(|cover| cover.sizes.get(&size))
            .map(String::as_str)
    }

    pub fn is_untitled(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// Cover image renditions keyed by pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    #[serde(default)]
    pub sizes: BTreeMap<u32, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackID,
    #[serde(default)]
    pub title: String,
    pub order: Option<i64>,
    pub track_group_id: TrackGroupID,
    #[serde(default)]
    pub is_preview: bool,
}

/// Body for updating a release. Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackGroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
}
