//! Process-wide default client and the free-function gateway.
//!
//! The default client is fixed for the lifetime of the process: either the
//! one passed to [`install`], or one built from the environment the first
//! time any gateway function runs.

use std::sync::OnceLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::{Client, Error, RequestOptions};

static DEFAULT_CLIENT: OnceLock<Client> = OnceLock::new();

/// Installs `client` as the process-wide default. Returns it back if a
/// default is already in place.
pub fn install(client: Client) -> Result<(), Client> {
    DEFAULT_CLIENT.set(client)
}

/// The process-wide default client, built from the environment on first use.
pub fn default_client() -> Result<&'static Client, Error> {
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client);
    }
    let client = Client::from_env()?;
    tracing::debug!("Using API base URL {:?}", client.base_url());
    Ok(DEFAULT_CLIENT.get_or_init(|| client))
}

/// GET `endpoint` and decode the JSON response.
pub async fn get<R>(endpoint: &str, options: &RequestOptions) -> Result<R, Error>
where
    R: DeserializeOwned,
{
    default_client()?.get(endpoint, options).await
}

/// POST `body` as JSON to `endpoint` and decode the JSON response.
pub async fn post<B, R>(endpoint: &str, body: &B, options: &RequestOptions) -> Result<R, Error>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    default_client()?.post(endpoint, body, options).await
}

/// PUT `body` as JSON to `endpoint` and decode the JSON response.
pub async fn put<B, R>(endpoint: &str, body: &B, options: &RequestOptions) -> Result<R, Error>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    default_client()?.put(endpoint, body, options).await
}

/// DELETE `endpoint` and decode the JSON response (an empty body decodes as `null`).
pub async fn del<R>(endpoint: &str, options: &RequestOptions) -> Result<R, Error>
where
    R: DeserializeOwned,
{
    default_client()?.del(endpoint, options).await
}
