use std::collections::HashMap;
use std::thread::{self, ScopedJoinHandle};

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::store::{
    FavoriteRecord, FavoritesStore, PlayRecord, PlayRecordStore, split_storage_key,
};

/// A favorited title joined with its watch progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FavoriteItem {
    pub(crate) id: String,
    pub(crate) source: String,
    pub(crate) title: String,
    pub(crate) year: String,
    pub(crate) poster: String,
    pub(crate) episodes: u32,
    pub(crate) source_name: String,
    pub(crate) current_episode: Option<u32>,
    pub(crate) search_title: Option<String>,
    pub(crate) save_time: i64,
}

/// Reads both stores concurrently and joins them once both reads are in.
pub(crate) fn load_favorites(
    favorites: &dyn FavoritesStore,
    play_records: &dyn PlayRecordStore,
) -> Result<Vec<FavoriteItem>> {
    let (favorites, play_records) = thread::scope(|scope| {
        let favorites = scope.spawn(|| favorites.all_favorites());
        let play_records = scope.spawn(|| play_records.all_play_records());
        (
            join_read(favorites, "favorites"),
            join_read(play_records, "play records"),
        )
    });
    let items = aggregate_favorites(favorites?, &play_records?);
    debug!(count = items.len(), "aggregated favorites");
    Ok(items)
}

fn join_read<T>(handle: ScopedJoinHandle<'_, Result<T>>, what: &str) -> Result<T> {
    handle
        .join()
        .map_err(|_| anyhow!("{what} read panicked"))?
}

/// Newest first; equal save times keep store order.
pub(crate) fn aggregate_favorites(
    mut favorites: Vec<(String, FavoriteRecord)>,
    play_records: &HashMap<String, PlayRecord>,
) -> Vec<FavoriteItem> {
    favorites.sort_by(|(_, a), (_, b)| b.save_time.cmp(&a.save_time));
    favorites
        .into_iter()
        .map(|(key, favorite)| {
            let (source, id) = split_storage_key(&key);
            FavoriteItem {
                id,
                source,
                current_episode: play_records.get(&key).map(|record| record.index),
                title: favorite.title,
                year: favorite.year,
                poster: favorite.cover,
                episodes: favorite.total_episodes,
                source_name: favorite.source_name,
                search_title: favorite.search_title,
                save_time: favorite.save_time,
            }
        })
        .collect()
}
