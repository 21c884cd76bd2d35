//! Query builders: the [`Query`] trait, [`QueryCommon`] paging fields and
//! [`TrackGroupQuery`]. Only fields that are set end up in the URL.

use url::Url;

use crate::types::ArtistID;

/// Trait implemented by all query builders.
pub trait Query {
    /// The query's parameters, in URL order.
    fn to_query_pairs(&self) -> Vec<(String, String)>;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.to_query_pairs() {
            url.query_pairs_mut().append_pair(&key, &value);
        }
        url
    }

    /// Skips the first `skip` results.
    fn with_skip(mut self, skip: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().skip = Some(skip);
        self
    }

    /// Limits the number of results.
    fn with_take(mut self, take: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().take = Some(take);
        self
    }
}

/// Paging fields shared by list queries. `None` uses the API default.
#[derive(Clone, Copy, Default, Debug)]
pub struct QueryCommon {
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl QueryCommon {
    fn push_pairs(&self, pairs: &mut Vec<(String, String)>) {
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(take) = self.take {
            pairs.push(("take".to_string(), take.to_string()));
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct TrackGroupQuery {
    pub common: QueryCommon,
    pub artist_id: Option<ArtistID>,
    pub title: Option<String>,
}

impl Query for TrackGroupQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(artist_id) = self.artist_id {
            pairs.push(("artistId".to_string(), artist_id.to_string()));
        }
        if let Some(title) = &self.title {
            pairs.push(("title".to_string(), title.clone()));
        }
        self.common.push_pairs(&mut pairs);
        pairs
    }
}

impl TrackGroupQuery {
    pub fn with_artist_id(mut self, artist_id: ArtistID) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}
