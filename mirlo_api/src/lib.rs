//! Request gateway for the Mirlo API.
//!
//! Every call is a single HTTP round trip against a configured base URL:
//! credentials are included by default, write calls carry a JSON body with
//! JSON headers, and any non-success status becomes one structured
//! [`Error::Fetch`]. Callers can use a [`Client`] directly or go through the
//! process-wide default client with [`get`], [`post`], [`put`] and [`del`].

mod client;
pub mod config;
mod errors;
mod global;
mod query;
pub mod request;
pub mod types;

pub use self::client::Client;
pub use self::config::GatewayConfig;
pub use self::errors::Error;
pub use self::global::{default_client, del, get, install, post, put};
pub use self::query::{Query, QueryCommon, TrackGroupQuery};
pub use self::request::{ApiRequest, Credentials, Method, PreparedRequest, RequestOptions};
