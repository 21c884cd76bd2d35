//! CLI subcommand implementations.

pub mod artists;
pub mod request;
pub mod track_groups;
