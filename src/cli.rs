use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "vodhome",
    version,
    about = "Hot catalog rows, continue watching and favorites from the terminal"
)]
pub struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "VODHOME_DB")]
    pub db: Option<PathBuf>,

    /// Catalog endpoint queried for hot content
    #[arg(long, global = true, env = "VODHOME_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Site announcement shown until dismissed
    #[arg(long, global = true, env = "VODHOME_ANNOUNCEMENT")]
    pub announcement: Option<String>,

    /// Catalog read timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Home,
    Favorites,
    ClearFavorites,
    Favorite(FavoriteArgs),
    Unfavorite(TitleRef),
    Progress(ProgressArgs),
    Continue,
    DismissAnnouncement,
}

#[derive(Debug, Clone, Args)]
pub struct TitleRef {
    #[arg(long)]
    pub source: String,
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct FavoriteArgs {
    #[command(flatten)]
    pub title_ref: TitleRef,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub cover: String,
    #[arg(long, default_value = "")]
    pub year: String,
    #[arg(long, default_value_t = 0)]
    pub total_episodes: u32,
    #[arg(long, default_value = "")]
    pub source_name: String,
    #[arg(long)]
    pub search_title: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProgressArgs {
    #[command(flatten)]
    pub title_ref: TitleRef,
    #[arg(long)]
    pub title: String,
    /// Episode number being watched
    #[arg(long)]
    pub episode: u32,
    #[arg(long, default_value_t = 0)]
    pub total_episodes: u32,
    /// Position within the episode, in seconds
    #[arg(long, default_value_t = 0)]
    pub play_time: u64,
    /// Episode duration, in seconds
    #[arg(long, default_value_t = 0)]
    pub total_time: u64,
    #[arg(long, default_value = "")]
    pub cover: String,
    #[arg(long, default_value = "")]
    pub year: String,
    #[arg(long, default_value = "")]
    pub source_name: String,
    #[arg(long)]
    pub search_title: Option<String>,
}
