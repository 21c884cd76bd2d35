use serde::{Deserialize, Serialize};

use super::{TrackGroup, UserID};

pub type ArtistID = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistID,
    pub name: String,
    pub bio: Option<String>,
    pub url_slug: Option<String>,
    pub user_id: UserID,
    #[serde(default)]
    pub track_groups: Vec<TrackGroup>,
}

impl Artist {
    /// Site path of the artist's page: `/{slug}`, lowercased, or `/{id}`
    /// when the artist has no slug.
    pub fn page_path(&self) -> String {
        format!("/{}", self.slug_or_id())
    }

    fn slug_or_id(&self) -> String {
        match &self.url_slug {
            Some(slug) if !slug.is_empty() => slug.to_lowercase(),
            _ => self.id.to_string(),
        }
    }
}
