use std::collections::HashMap;

use crate::store::{PlayRecord, split_storage_key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContinueItem {
    pub(crate) id: String,
    pub(crate) source: String,
    pub(crate) title: String,
    pub(crate) source_name: String,
    pub(crate) episode: u32,
    pub(crate) total_episodes: u32,
    pub(crate) progress_percent: u8,
    pub(crate) save_time: i64,
}

pub(crate) fn progress_percent(play_time: u64, total_time: u64) -> u8 {
    if total_time == 0 {
        return 0;
    }
    (u128::from(play_time.min(total_time)) * 100 / u128::from(total_time)) as u8
}

/// Most recently watched first; ties ordered by key so output is deterministic.
pub(crate) fn continue_watching(records: HashMap<String, PlayRecord>) -> Vec<ContinueItem> {
    let mut entries: Vec<(String, PlayRecord)> = records.into_iter().collect();
    entries.sort_by(|(key_a, a), (key_b, b)| {
        b.save_time
            .cmp(&a.save_time)
            .then_with(|| key_a.cmp(key_b))
    });
    entries
        .into_iter()
        .map(|(key, record)| {
            let (source, id) = split_storage_key(&key);
            ContinueItem {
                id,
                source,
                progress_percent: progress_percent(record.play_time, record.total_time),
                title: record.title,
                source_name: record.source_name,
                episode: record.index,
                total_episodes: record.total_episodes,
                save_time: record.save_time,
            }
        })
        .collect()
}
