//! Raw gateway calls: `get`, `post`, `put` and `delete` against any endpoint.

use anyhow::{bail, Context, Result};
use clap::Args;
use mirlo_api::{Credentials, RequestOptions};
use serde_json::Value;

use crate::output::print_json;

#[derive(Args)]
pub struct TransportArgs {
    /// Extra request header as `name:value` (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Cookie policy: include, same-origin, omit
    #[arg(long)]
    pub credentials: Option<String>,

    /// Query parameter as `key=value` (repeatable)
    #[arg(long = "query")]
    pub query: Vec<String>,
}

#[derive(Args)]
pub struct ReadArgs {
    /// Endpoint path relative to the API root (e.g. trackGroups/5)
    pub endpoint: String,

    #[command(flatten)]
    pub transport: TransportArgs,
}

#[derive(Args)]
pub struct WriteArgs {
    /// Endpoint path relative to the API root (e.g. trackGroups/5)
    pub endpoint: String,

    /// JSON request body
    #[arg(long, default_value = "{}")]
    pub data: String,

    #[command(flatten)]
    pub transport: TransportArgs,
}

impl TransportArgs {
    pub fn to_options(&self) -> Result<RequestOptions> {
        let mut options = RequestOptions::new();
        for raw in &self.headers {
            let (name, value) = parse_header(raw)?;
            options.set_header(name, value);
        }
        if let Some(raw) = &self.credentials {
            let credentials = raw.parse::<Credentials>().map_err(anyhow::Error::msg)?;
            options = options.with_credentials(credentials);
        }
        for raw in &self.query {
            let (key, value) = parse_query_pair(raw)?;
            options = options.with_query_pair(key, value);
        }
        Ok(options)
    }
}

pub fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid header '{}', expected name:value", raw),
    }
}

pub fn parse_query_pair(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("invalid query parameter '{}', expected key=value", raw),
    }
}

fn parse_body(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).context("--data must be valid JSON")
}

fn endpoint(raw: &str) -> &str {
    raw.trim_start_matches('/')
}

pub async fn get(args: &ReadArgs) -> Result<()> {
    let options = args.transport.to_options()?;
    let value: Value = mirlo_api::get(endpoint(&args.endpoint), &options).await?;
    print_json(&value);
    Ok(())
}

pub async fn delete(args: &ReadArgs) -> Result<()> {
    let options = args.transport.to_options()?;
    let value: Value = mirlo_api::del(endpoint(&args.endpoint), &options).await?;
    print_json(&value);
    Ok(())
}

pub async fn post(args: &WriteArgs) -> Result<()> {
    let options = args.transport.to_options()?;
    let body = parse_body(&args.data)?;
    let value: Value = mirlo_api::post(endpoint(&args.endpoint), &body, &options).await?;
    print_json(&value);
    Ok(())
}

pub async fn put(args: &WriteArgs) -> Result<()> {
    let options = args.transport.to_options()?;
    let body = parse_body(&args.data)?;
    let value: Value = mirlo_api::put(endpoint(&args.endpoint), &body, &options).await?;
    print_json(&value);
    Ok(())
}
