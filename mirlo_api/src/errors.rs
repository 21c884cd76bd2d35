//! Error types for the API gateway.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API returned a non-success status. `message` is the body's `error`
    /// field when the body is JSON, otherwise the raw body text.
    #[error("Request failed with status {status}: {message}")]
    Fetch { status: u16, message: String },
    /// A success response whose body could not be decoded into the expected type.
    #[error("Failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body")]
    Encode(#[source] serde_json::Error),
    /// The base URL joined with the endpoint is not a valid URL.
    #[error("Invalid request URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// A caller-supplied header name or value is not valid HTTP.
    #[error("Invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },
    /// The transport failed (connection, TLS, timeout, body read).
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// HTTP status of a structured failure, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server answered with a non-success status.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// True when a success response could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_and_status() {
        let err = Error::Fetch {
            status: 400,
            message: "Title taken".to_string(),
        };
        assert_eq!(err.status(), Some(400));
        assert!(err.is_fetch());
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "Request failed with status 400: Title taken");
    }

    #[test]
    fn decode_error_is_distinct_from_fetch() {
        let source = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = Error::Decode {
            source,
            body: "{nope".to_string(),
        };
        assert!(err.is_decode());
        assert!(!err.is_fetch());
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("Failed to decode response body"));
    }
}
