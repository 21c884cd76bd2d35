use anyhow::Result;
use clap::Args;
use mirlo_api::Client;

use crate::output::{print_artist_table, print_json, print_track_groups_table, OutputFormat};

#[derive(Args)]
pub struct ArtistArgs {
    /// Artist ID or URL slug
    pub id_or_slug: String,
}

pub async fn run(args: &ArtistArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let resp = client.get_artist(&args.id_or_slug).await?;
    match format {
        OutputFormat::Json => print_json(&resp.result),
        OutputFormat::Table => {
            print_artist_table(&resp.result);
            if !resp.result.track_groups.is_empty() {
                print_track_groups_table(&resp.result.track_groups, Some(&resp.result));
            }
        }
    }
    Ok(())
}
