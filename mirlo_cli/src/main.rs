mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mirlo_api::{Client, GatewayConfig};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "mirlo")]
#[command(about = "Query and manage releases through the Mirlo API")]
struct Cli {
    /// API base URL (overrides MIRLO_API_DOMAIN)
    #[arg(long, global = true)]
    api_root: Option<String>,

    /// Output format: json or table
    #[arg(long, default_value = "json", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET an endpoint and print the JSON response
    Get(commands::request::ReadArgs),
    /// POST a JSON body to an endpoint
    Post(commands::request::WriteArgs),
    /// PUT a JSON body to an endpoint
    Put(commands::request::WriteArgs),
    /// DELETE an endpoint
    Delete(commands::request::ReadArgs),
    /// Show an artist and their releases
    Artist(commands::artists::ArtistArgs),
    /// List published releases
    TrackGroups(commands::track_groups::TrackGroupsArgs),
    /// Show a single release
    TrackGroup(commands::track_groups::TrackGroupArgs),
    /// Publish one of a user's releases
    Publish(commands::track_groups::PublishArgs),
}

/// `RUST_LOG` directives plus info-level defaults for the binary and the
/// API library.
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    Ok(EnvFilter::new(rust_log.unwrap_or_default())
        .add_directive("mirlo=info".parse()?)
        .add_directive("mirlo_api=info".parse()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref())?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        _ => OutputFormat::Json,
    };

    if let Some(api_root) = &cli.api_root {
        let config = GatewayConfig::from_env().with_base_url(api_root);
        let client = Client::new(config).context("failed to build API client")?;
        if mirlo_api::install(client).is_err() {
            tracing::warn!("API client already initialized, ignoring --api-root");
        }
    }
    let client = mirlo_api::default_client().context("failed to build API client")?;

    match &cli.command {
        Commands::Get(args) => commands::request::get(args).await?,
        Commands::Post(args) => commands::request::post(args).await?,
        Commands::Put(args) => commands::request::put(args).await?,
        Commands::Delete(args) => commands::request::delete(args).await?,
        Commands::Artist(args) => commands::artists::run(args, client, &format).await?,
        Commands::TrackGroups(args) => {
            commands::track_groups::run_list(args, client, &format).await?
        }
        Commands::TrackGroup(args) => commands::track_groups::run_one(args, client, &format).await?,
        Commands::Publish(args) => {
            commands::track_groups::run_publish(args, client, &format).await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::log_filter;

    #[test]
    fn default_filter_enables_info_for_binary_and_library() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(log_filter(None).unwrap())
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::INFO));
            assert!(tracing::enabled!(target: "mirlo::commands::track_groups", Level::INFO));
            assert!(tracing::enabled!(target: "mirlo_api::client", Level::INFO));
            assert!(!tracing::enabled!(Level::DEBUG));
        });
    }
}
