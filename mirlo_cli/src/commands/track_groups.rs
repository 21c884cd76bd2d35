use anyhow::Result;
use clap::Args;
use mirlo_api::types::{TrackGroup, TrackGroupID, UserID};
use mirlo_api::{Client, Query, TrackGroupQuery};

use crate::output::{print_json, print_track_groups_table, print_tracks_table, OutputFormat};

#[derive(Args)]
pub struct TrackGroupsArgs {
    /// Only releases by this artist
    #[arg(long)]
    pub artist_id: Option<i64>,

    /// Filter by title
    #[arg(long)]
    pub title: Option<String>,

    /// Number of releases to skip
    #[arg(long)]
    pub skip: Option<i64>,

    /// Number of releases to return
    #[arg(long, default_value = "20")]
    pub take: i64,
}

#[derive(Args)]
pub struct TrackGroupArgs {
    /// Release ID
    #[arg(long)]
    pub id: TrackGroupID,

    /// Fetch through the owning user, which includes unpublished releases
    #[arg(long)]
    pub user_id: Option<UserID>,

    /// Artist the release belongs to (only with --user-id)
    #[arg(long, requires = "user_id")]
    pub artist_id: Option<i64>,
}

#[derive(Args)]
pub struct PublishArgs {
    /// Owning user ID
    #[arg(long)]
    pub user_id: UserID,

    /// Release ID
    #[arg(long)]
    pub id: TrackGroupID,
}

pub fn build_query(args: &TrackGroupsArgs) -> TrackGroupQuery {
    let mut query = TrackGroupQuery::default().with_take(args.take);
    if let Some(skip) = args.skip {
        query = query.with_skip(skip);
    }
    if let Some(artist_id) = args.artist_id {
        query = query.with_artist_id(artist_id);
    }
    if let Some(title) = &args.title {
        query = query.with_title(title);
    }
    query
}

pub async fn run_list(
    args: &TrackGroupsArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let resp = client.get_track_groups(&build_query(args)).await?;
    match format {
        OutputFormat::Json => print_json(&resp.results),
        OutputFormat::Table => {
            print_track_groups_table(&resp.results, None);
            if let Some(total) = resp.total {
                eprintln!("Showing {} of {} releases", resp.results.len(), total);
            }
        }
    }
    Ok(())
}

pub async fn run_one(args: &TrackGroupArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let resp = match args.user_id {
        Some(user_id) => {
            client
                .get_user_track_group(user_id, args.id, args.artist_id)
                .await?
        }
        None => client.get_track_group(args.id).await?,
    };
    print_track_group(&resp.result, format);
    Ok(())
}

pub async fn run_publish(args: &PublishArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let resp = client.publish_user_track_group(args.user_id, args.id).await?;
    tracing::info!("Published release {}", resp.result.id);
    print_track_group(&resp.result, format);
    Ok(())
}

fn print_track_group(track_group: &TrackGroup, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(track_group),
        OutputFormat::Table => {
            print_track_groups_table(std::slice::from_ref(track_group), None);
            if !track_group.tracks.is_empty() {
                print_tracks_table(&track_group.tracks);
            }
        }
    }
}
