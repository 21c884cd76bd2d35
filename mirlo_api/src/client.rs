//! HTTP client for the Mirlo API.

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, SET_COOKIE};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use url::{Origin, Url};

use crate::{
    config::GatewayConfig,
    query::{Query, TrackGroupQuery},
    request::{ApiRequest, Credentials, Method, PreparedRequest, RequestOptions},
    types::{
        Artist, ListResponse, Response, TrackGroup, TrackGroupID, TrackGroupUpdate, UserID,
    },
    Error,
};

/// HTTP client for the Mirlo API.
///
/// Holds the base URL, one `reqwest::Client` and the cookie store used for
/// credentialed requests. Calls share nothing else, so a `Client` can be
/// used from many tasks at once.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    base_origin: Option<Origin>,
    cookies: Jar,
}

impl Client {
    /// Creates a client from explicit transport settings.
    pub fn new(config: GatewayConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Network(e)
        })?;
        let base_origin = Url::parse(&config.base_url).ok().map(|url| url.origin());
        Ok(Self {
            http,
            base_url: config.base_url,
            base_origin,
            cookies: Jar::default(),
        })
    }

    /// Creates a client configured from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(GatewayConfig::from_env())
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(GatewayConfig::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `endpoint` to the base URL with a single `/`.
    pub fn url_for(&self, endpoint: &str) -> Result<Url, Error> {
        let raw = format!("{}/{}", self.base_url, endpoint);
        Url::parse(&raw).map_err(|source| {
            tracing::error!("Invalid URL constructed: {}", source);
            Error::InvalidUrl { url: raw, source }
        })
    }

    /// Resolves a request without sending it: URL with query pairs, merged
    /// headers and, when credentials apply, the stored cookies.
    pub fn prepare(&self, request: ApiRequest) -> Result<PreparedRequest, Error> {
        let options = request.effective_options();
        let credentials = options.credentials_or_default();

        let mut url = self.url_for(&request.endpoint)?;
        for (key, value) in &options.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let mut headers = HeaderMap::new();
        if self.sends_credentials(credentials, &url) {
            if let Some(cookie) = self.cookies.cookies(&url) {
                headers.insert(COOKIE, cookie);
            }
        }
        for (name, value) in &options.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(PreparedRequest {
            method: request.method,
            url,
            headers,
            body: request.body,
            credentials,
        })
    }

    /// Sends one request and decodes the response body into `R`.
    pub async fn execute<R>(&self, request: ApiRequest) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let prepared = self.prepare(request)?;
        let method = prepared.method;
        let url = prepared.url;
        tracing::debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method.to_reqwest(), url.clone())
            .headers(prepared.headers);
        if let Some(body) = prepared.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send {} {}: {}", method, url, e);
            Error::Network(e)
        })?;

        if self.sends_credentials(prepared.credentials, &url) {
            let mut set_cookies = resp.headers().get_all(SET_COOKIE).iter();
            self.cookies.set_cookies(&mut set_cookies, &url);
        }

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(e)
        })?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!("{} {} failed with status {}: {}", method, url, status, message);
            return Err(Error::Fetch {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&body)
    }

    pub async fn get<R>(&self, endpoint: &str, options: &RequestOptions) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        self.execute(ApiRequest::new(Method::Get, endpoint).with_options(options))
            .await
    }

    pub async fn post<B, R>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Post, endpoint)
            .with_json_body(body)?
            .with_options(options);
        self.execute(request).await
    }

    pub async fn put<B, R>(
        &self,
        endpoint: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Put, endpoint)
            .with_json_body(body)?
            .with_options(options);
        self.execute(request).await
    }

    pub async fn del<R>(&self, endpoint: &str, options: &RequestOptions) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        self.execute(ApiRequest::new(Method::Delete, endpoint).with_options(options))
            .await
    }

    /// Fetches an artist by numeric ID or URL slug.
    pub async fn get_artist(&self, id_or_slug: &str) -> Result<Response<Artist>, Error> {
        self.get(&format!("artists/{}", id_or_slug), &RequestOptions::default())
            .await
    }

    /// Fetches published releases matching the given query.
    pub async fn get_track_groups(
        &self,
        query: &TrackGroupQuery,
    ) -> Result<ListResponse<TrackGroup>, Error> {
        self.get("trackGroups", &RequestOptions::new().with_query(query))
            .await
    }

    /// Fetches a single published release.
    pub async fn get_track_group(&self, id: TrackGroupID) -> Result<Response<TrackGroup>, Error> {
        self.get(&format!("trackGroups/{}", id), &RequestOptions::default())
            .await
    }

    /// Fetches an object owned by a user, e.g. `users/{user}/trackGroups/{id}`.
    pub async fn get_user_object<T, Q>(
        &self,
        collection: &str,
        user_id: UserID,
        object_id: i64,
        query: Option<&Q>,
    ) -> Result<Response<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let endpoint = format!("users/{}/{}/{}", user_id, collection, object_id);
        let options = match query {
            Some(query) => RequestOptions::new().with_query(query),
            None => RequestOptions::default(),
        };
        self.get(&endpoint, &options).await
    }

    /// Fetches one of the user's releases, including unpublished ones.
    pub async fn get_user_track_group(
        &self,
        user_id: UserID,
        track_group_id: TrackGroupID,
        artist_id: Option<i64>,
    ) -> Result<Response<TrackGroup>, Error> {
        let query = artist_id.map(|id| TrackGroupQuery::default().with_artist_id(id));
        self.get_user_object("trackGroups", user_id, track_group_id, query.as_ref())
            .await
    }

    pub async fn update_user_track_group(
        &self,
        user_id: UserID,
        track_group_id: TrackGroupID,
        update: &TrackGroupUpdate,
    ) -> Result<Response<TrackGroup>, Error> {
        let endpoint = format!("users/{}/trackGroups/{}", user_id, track_group_id);
        self.put(&endpoint, update, &RequestOptions::default()).await
    }

    pub async fn publish_user_track_group(
        &self,
        user_id: UserID,
        track_group_id: TrackGroupID,
    ) -> Result<Response<TrackGroup>, Error> {
        let endpoint = format!("users/{}/trackGroups/{}/publish", user_id, track_group_id);
        self.put(&endpoint, &serde_json::json!({}), &RequestOptions::default())
            .await
    }

    /// Deletes one of the user's releases. Whatever body the API answers
    /// with is discarded.
    pub async fn delete_user_track_group(
        &self,
        user_id: UserID,
        track_group_id: TrackGroupID,
    ) -> Result<(), Error> {
        let endpoint = format!("users/{}/trackGroups/{}", user_id, track_group_id);
        self.del::<IgnoredAny>(&endpoint, &RequestOptions::default())
            .await?;
        Ok(())
    }

    fn sends_credentials(&self, credentials: Credentials, url: &Url) -> bool {
        match credentials {
            Credentials::Include => true,
            Credentials::SameOrigin => self.base_origin.as_ref() == Some(&url.origin()),
            Credentials::Omit => false,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// The `error` field of a JSON error body, or the raw body text. JSON
/// without a string `error` field also yields the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.to_string(),
    }
}

/// Decodes a success body. An empty body is read as JSON `null`.
fn decode_body<R>(body: &str) -> Result<R, Error>
where
    R: DeserializeOwned,
{
    let json = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str::<R>(json).map_err(|source| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse response: {} | body: {}", source, snippet);
        Error::Decode {
            source,
            body: snippet,
        }
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
