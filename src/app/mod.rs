mod announcement;
mod catalog;
mod continue_watching;
mod display;
mod favorites;
mod home;


use std::thread;

use anyhow::{Result, anyhow, bail};
use chrono::Utc;

use crate::cli::{Cli, Command, FavoriteArgs, ProgressArgs, TitleRef};
use crate::config::Config;
use crate::db::Database;
use crate::store::{FavoriteRecord, PlayRecord, PlayRecordStore, storage_key};

use self::catalog::{RowItem, fetch_hot_rows};
use self::continue_watching::{ContinueItem, continue_watching};
use self::display::{episode_progress, format_saved_at, truncate};
use self::favorites::FavoriteItem;
use self::home::HomeView;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli)?;
    let db = open_db(&config)?;

    match cli.command {
        Some(Command::Home) | None => run_home(&db, &config)?,
        Some(Command::Favorites) => run_favorites(&db)?,
        Some(Command::ClearFavorites) => run_clear_favorites(&db)?,
        Some(Command::Favorite(args)) => run_favorite(&db, args)?,
        Some(Command::Unfavorite(title_ref)) => run_unfavorite(&db, &title_ref)?,
        Some(Command::Progress(args)) => run_progress(&db, args)?,
        Some(Command::Continue) => run_continue(&db)?,
        Some(Command::DismissAnnouncement) => run_dismiss_announcement(&db, &config)?,
    }

    Ok(())
}

fn run_home(db: &Database, config: &Config) -> Result<()> {
    let mut view = HomeView::new();
    view.activate_home();

    if let Some(text) = announcement::pending_announcement(db, config.announcement.as_deref())? {
        println!("Announcement: {text}");
        println!("  (run `vodhome dismiss-announcement` to hide it)");
        println!();
    }

    let (rows, records) = thread::scope(|scope| {
        let rows = scope.spawn(|| fetch_hot_rows(config));
        let records = db.all_play_records();
        (rows.join(), records)
    });
    let rows = rows.map_err(|_| anyhow!("hot content fetch panicked"))?;
    view.apply_hot_rows(rows);

    print_continue_watching(&continue_watching(records?));
    println!();
    print_hot_row("Hot Movies", &view.hot_rows.movies);
    println!();
    print_hot_row("Hot TV Shows", &view.hot_rows.tv_shows);
    Ok(())
}

fn run_favorites(db: &Database) -> Result<()> {
    let mut view = HomeView::new();
    view.show_favorites(db, db)?;
    print_favorites(&view);
    Ok(())
}

fn run_clear_favorites(db: &Database) -> Result<()> {
    let mut view = HomeView::new();
    view.clear_favorites(db)?;
    println!("Cleared all favorites.");
    view.show_favorites(db, db)?;
    print_favorites(&view);
    Ok(())
}

fn validated_key(title_ref: &TitleRef) -> Result<String> {
    if title_ref.source.is_empty() || title_ref.source.contains('+') {
        bail!(
            "invalid source '{}': must be non-empty and must not contain '+'",
            title_ref.source
        );
    }
    Ok(storage_key(&title_ref.source, &title_ref.id))
}

fn run_favorite(db: &Database, args: FavoriteArgs) -> Result<()> {
    let key = validated_key(&args.title_ref)?;
    let favorite = FavoriteRecord {
        title: args.title,
        cover: args.cover,
        year: args.year,
        total_episodes: args.total_episodes,
        source_name: args.source_name,
        search_title: args.search_title,
        save_time: Utc::now().timestamp_millis(),
    };
    db.upsert_favorite(&key, &favorite)?;
    println!("Saved favorite: {}", favorite.title);
    Ok(())
}

fn run_unfavorite(db: &Database, title_ref: &TitleRef) -> Result<()> {
    let key = validated_key(title_ref)?;
    if db.delete_favorite(&key)? {
        println!("Removed favorite {key}");
    } else {
        println!("No favorite stored for {key}");
    }
    Ok(())
}

fn run_progress(db: &Database, args: ProgressArgs) -> Result<()> {
    let key = validated_key(&args.title_ref)?;
    let record = PlayRecord {
        title: args.title,
        source_name: args.source_name,
        cover: args.cover,
        year: args.year,
        index: args.episode,
        total_episodes: args.total_episodes,
        play_time: args.play_time,
        total_time: args.total_time,
        save_time: Utc::now().timestamp_millis(),
        search_title: args.search_title,
    };
    db.upsert_play_record(&key, &record)?;
    println!(
        "Updated progress: {} -> episode {}",
        record.title,
        episode_progress(Some(record.index), record.total_episodes)
    );
    Ok(())
}

fn run_continue(db: &Database) -> Result<()> {
    print_continue_watching(&continue_watching(db.all_play_records()?));
    Ok(())
}

fn run_dismiss_announcement(db: &Database, config: &Config) -> Result<()> {
    match config.announcement.as_deref() {
        Some(text) => {
            announcement::dismiss(db, text)?;
            println!("Announcement dismissed.");
        }
        None => println!("No announcement configured."),
    }
    Ok(())
}

fn print_continue_watching(items: &[ContinueItem]) {
    println!("Continue Watching");
    if items.is_empty() {
        println!("  Nothing in progress.");
        return;
    }
    println!(
        "  {:<40} {:<16} {:<10} {:<6} {:<24}",
        "TITLE", "SOURCE", "EP", "DONE", "LAST WATCHED"
    );
    for item in items {
        println!(
            "  {:<40} {:<16} {:<10} {:<6} {:<24}",
            truncate(&item.title, 40),
            truncate(&item.source_name, 16),
            episode_progress(Some(item.episode), item.total_episodes),
            format!("{}%", item.progress_percent),
            format_saved_at(item.save_time)
        );
        println!("      {}", storage_key(&item.source, &item.id));
    }
}

/// Rows are printed only after the catalog fetch has settled.
fn print_hot_row(heading: &str, items: &[RowItem]) {
    println!("{heading}");
    if items.is_empty() {
        println!("  Nothing to show.");
        return;
    }
    for item in items {
        println!(
            "  {:<40} {:<20}",
            truncate(&item.title, 40),
            truncate(&item.remark, 20)
        );
    }
}

fn print_favorites(view: &HomeView) {
    println!("My Favorites");
    if view.favorites.is_empty() {
        println!("  No favorites yet.");
        return;
    }
    println!(
        "  {:<40} {:<16} {:<6} {:<10} {:<24}",
        "TITLE", "SOURCE", "YEAR", "EP", "SAVED"
    );
    for item in &view.favorites {
        print_favorite(item);
    }
}

fn print_favorite(item: &FavoriteItem) {
    println!(
        "  {:<40} {:<16} {:<6} {:<10} {:<24}",
        truncate(&item.title, 40),
        truncate(&item.source_name, 16),
        item.year,
        episode_progress(item.current_episode, item.episodes),
        format_saved_at(item.save_time)
    );

    let mut details = vec![storage_key(&item.source, &item.id)];
    if let Some(search_title) = item.search_title.as_deref().filter(|t| !t.is_empty()) {
        details.push(format!("search: {search_title}"));
    }
    if !item.poster.is_empty() {
        details.push(format!("poster: {}", item.poster));
    }
    println!("      {}", details.join("  "));
}

fn open_db(config: &Config) -> Result<Database> {
    let db = Database::open(&config.database_path)?;
    db.migrate()?;
    Ok(db)
}
