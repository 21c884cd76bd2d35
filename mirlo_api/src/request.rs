//! Request descriptors and per-call transport options.
//!
//! Options are merged in a fixed order: gateway defaults first
//! ([`RequestOptions::defaults_for`]), then the caller's options. The last
//! write wins per header name and for the credential mode.

use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderMap;
use serde::Serialize;
use url::Url;

use crate::{query::Query, Error};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the gateway sends a JSON body (and JSON headers) for this method.
    pub fn sends_json_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cookie policy for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Attach stored cookies and store cookies the server sets.
    #[default]
    Include,
    /// Like `Include`, but only when the target shares the base URL's origin.
    SameOrigin,
    /// Never attach or store cookies.
    Omit,
}

impl FromStr for Credentials {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "include" => Ok(Credentials::Include),
            "same-origin" => Ok(Credentials::SameOrigin),
            "omit" => Ok(Credentials::Omit),
            other => Err(format!(
                "unknown credentials mode '{}' (expected include, same-origin or omit)",
                other
            )),
        }
    }
}

/// Caller-supplied transport overrides. Every field is optional; unset
/// fields keep the gateway default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Header overrides. Names compare case-insensitively.
    pub headers: Vec<(String, String)>,
    /// Cookie policy. `None` keeps the default of [`Credentials::Include`].
    pub credentials: Option<Credentials>,
    /// Query pairs appended to the request URL, in order.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The options the gateway applies before any caller override.
    pub fn defaults_for(method: Method) -> Self {
        let mut defaults = Self {
            credentials: Some(Credentials::Include),
            ..Self::default()
        };
        if method.sends_json_body() {
            defaults.set_header("Accept", "application/json");
            defaults.set_header("Content-Type", "application/json");
        }
        defaults
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends every parameter of a query builder.
    pub fn with_query(mut self, query: &impl Query) -> Self {
        self.query.extend(query.to_query_pairs());
        self
    }

    /// Sets a header, replacing any existing header with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Applies `overrides` on top of `self` and returns the result.
    pub fn merge(mut self, overrides: &RequestOptions) -> Self {
        for (name, value) in &overrides.headers {
            self.set_header(name.clone(), value.clone());
        }
        if let Some(credentials) = overrides.credentials {
            self.credentials = Some(credentials);
        }
        self.query.extend(overrides.query.iter().cloned());
        self
    }

    pub fn credentials_or_default(&self) -> Credentials {
        self.credentials.unwrap_or_default()
    }
}

/// One logical gateway call. Built per call and consumed by
/// [`Client::execute`](crate::Client::execute).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, without a leading `/`.
    pub endpoint: String,
    /// JSON text sent as the request body.
    pub body: Option<String>,
    /// Caller overrides, merged over the gateway defaults at send time.
    pub options: RequestOptions,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: &str) -> Self {
        Self {
            method,
            endpoint: endpoint.to_string(),
            body: None,
            options: RequestOptions::default(),
        }
    }

    /// Serializes `body` to JSON text.
    pub fn with_json_body<B>(mut self, body: &B) -> Result<Self, Error>
    where
        B: Serialize + ?Sized,
    {
        let json = serde_json::to_string(body).map_err(Error::Encode)?;
        self.body = Some(json);
        Ok(self)
    }

    pub fn with_options(mut self, options: &RequestOptions) -> Self {
        self.options = options.clone();
        self
    }

    /// Gateway defaults for this method with the caller's options applied.
    pub fn effective_options(&self) -> RequestOptions {
        RequestOptions::defaults_for(self.method).merge(&self.options)
    }
}

/// A request resolved against a client: absolute URL, final headers
/// (including any stored cookies) and the effective credential mode.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub credentials: Credentials,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::TrackGroupQuery;

    #[test]
    fn get_and_delete_defaults_only_include_credentials() {
        for method in [Method::Get, Method::Delete] {
            let defaults = RequestOptions::defaults_for(method);
            assert_eq!(defaults.credentials, Some(Credentials::Include));
            assert!(defaults.headers.is_empty());
        }
    }

    #[test]
    fn write_defaults_carry_json_headers() {
        for method in [Method::Post, Method::Put] {
            let defaults = RequestOptions::defaults_for(method);
            assert_eq!(defaults.header("accept"), Some("application/json"));
            assert_eq!(defaults.header("content-type"), Some("application/json"));
        }
    }

    #[test]
    fn caller_headers_win_on_collision() {
        let caller = RequestOptions::new()
            .with_header("content-type", "text/plain")
            .with_header("X-Trace", "abc");
        let merged = RequestOptions::defaults_for(Method::Post).merge(&caller);

        assert_eq!(merged.header("Content-Type"), Some("text/plain"));
        assert_eq!(merged.header("Accept"), Some("application/json"));
        assert_eq!(merged.header("x-trace"), Some("abc"));
        assert_eq!(merged.headers.len(), 3);
    }

    #[test]
    fn caller_credentials_replace_default() {
        let merged = RequestOptions::defaults_for(Method::Get)
            .merge(&RequestOptions::new().with_credentials(Credentials::Omit));
        assert_eq!(merged.credentials_or_default(), Credentials::Omit);

        let untouched = RequestOptions::defaults_for(Method::Get).merge(&RequestOptions::new());
        assert_eq!(untouched.credentials_or_default(), Credentials::Include);
    }

    #[test]
    fn set_header_keeps_last_write() {
        let options = RequestOptions::new()
            .with_header("Authorization", "Bearer one")
            .with_header("authorization", "Bearer two");
        assert_eq!(options.headers, vec![("authorization".to_string(), "Bearer two".to_string())]);
    }

    #[test]
    fn query_pairs_are_appended_in_order() {
        let options = RequestOptions::new()
            .with_query_pair("a", "1")
            .with_query(&TrackGroupQuery::default().with_artist_id(7));
        assert_eq!(
            options.query,
            vec![
                ("a".to_string(), "1".to_string()),
                ("artistId".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn json_body_is_serialized_text() {
        let request = ApiRequest::new(Method::Post, "tracks")
            .with_json_body(&json!({"title": "New"}))
            .unwrap();
        assert_eq!(request.body.as_deref(), Some(r#"{"title":"New"}"#));
    }

    #[test]
    fn credentials_parse() {
        assert_eq!("include".parse::<Credentials>(), Ok(Credentials::Include));
        assert_eq!("same-origin".parse::<Credentials>(), Ok(Credentials::SameOrigin));
        assert_eq!("omit".parse::<Credentials>(), Ok(Credentials::Omit));
        assert!("always".parse::<Credentials>().is_err());
    }
}
