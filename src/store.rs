//! Store records and the read interfaces the views depend on.
//!
//! Favorites and play records share one key space: `"<source>+<id>"`.

use std::collections::HashMap;

use anyhow::Result;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRecord {
    pub title: String,
    pub cover: String,
    pub year: String,
    pub total_episodes: u32,
    pub source_name: String,
    pub search_title: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub save_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRecord {
    pub title: String,
    pub source_name: String,
    pub cover: String,
    pub year: String,
    /// Last watched episode number.
    pub index: u32,
    pub total_episodes: u32,
    /// Seconds into the episode.
    pub play_time: u64,
    /// Episode duration in seconds.
    pub total_time: u64,
    pub save_time: i64,
    pub search_title: Option<String>,
}

/// Favorites in insertion order.
pub trait FavoritesStore: Sync {
    fn all_favorites(&self) -> Result<Vec<(String, FavoriteRecord)>>;
    fn clear_favorites(&self) -> Result<()>;
}

pub trait PlayRecordStore: Sync {
    fn all_play_records(&self) -> Result<HashMap<String, PlayRecord>>;
}

pub fn storage_key(source: &str, id: &str) -> String {
    format!("{source}+{id}")
}

/// Splits at the first `+`. A `source` containing `+` cannot round-trip.
/// Keys without a separator keep the whole key as the id.
pub fn split_storage_key(key: &str) -> (String, String) {
    match key.split_once('+') {
        Some((source, id)) => (source.to_string(), id.to_string()),
        None => {
            warn!(key, "storage key has no source separator");
            (String::new(), key.to_string())
        }
    }
}
