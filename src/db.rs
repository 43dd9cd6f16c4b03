use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::store::{FavoriteRecord, FavoritesStore, PlayRecord, PlayRecordStore};

pub const SEEN_ANNOUNCEMENT_SETTING: &str = "has_seen_announcement";

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?;
        debug!(path = %path.display(), "opened database");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        db.migrate()?;
        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                storage_key TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                cover TEXT NOT NULL,
                year TEXT NOT NULL,
                total_episodes INTEGER NOT NULL,
                source_name TEXT NOT NULL,
                search_title TEXT,
                save_time INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS play_records (
                storage_key TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                source_name TEXT NOT NULL,
                cover TEXT NOT NULL,
                year TEXT NOT NULL,
                episode_index INTEGER NOT NULL,
                total_episodes INTEGER NOT NULL,
                play_time INTEGER NOT NULL,
                total_time INTEGER NOT NULL,
                save_time INTEGER NOT NULL,
                search_title TEXT
            );
            CREATE TABLE IF NOT EXISTS settings (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Upserts keep the existing rowid, so a re-saved favorite keeps its insertion slot.
    pub fn upsert_favorite(&self, key: &str, favorite: &FavoriteRecord) -> Result<()> {
        self.conn()?.execute(
            r#"
            INSERT INTO favorites (storage_key, title, cover, year, total_episodes, source_name, search_title, save_time)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(storage_key) DO UPDATE SET
                title = excluded.title,
                cover = excluded.cover,
                year = excluded.year,
                total_episodes = excluded.total_episodes,
                source_name = excluded.source_name,
                search_title = excluded.search_title,
                save_time = excluded.save_time
            "#,
            params![
                key,
                favorite.title,
                favorite.cover,
                favorite.year,
                favorite.total_episodes,
                favorite.source_name,
                favorite.search_title,
                favorite.save_time
            ],
        )?;
        Ok(())
    }

    pub fn delete_favorite(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()?
            .execute("DELETE FROM favorites WHERE storage_key = ?1", params![key])?;
        Ok(affected > 0)
    }

    pub fn upsert_play_record(&self, key: &str, record: &PlayRecord) -> Result<()> {
        let play_time = i64::try_from(record.play_time)
            .with_context(|| format!("play time {} is out of range", record.play_time))?;
        let total_time = i64::try_from(record.total_time)
            .with_context(|| format!("total time {} is out of range", record.total_time))?;
        self.conn()?.execute(
            r#"
            INSERT INTO play_records (storage_key, title, source_name, cover, year, episode_index, total_episodes, play_time, total_time, save_time, search_title)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(storage_key) DO UPDATE SET
                title = excluded.title,
                source_name = excluded.source_name,
                cover = excluded.cover,
                year = excluded.year,
                episode_index = excluded.episode_index,
                total_episodes = excluded.total_episodes,
                play_time = excluded.play_time,
                total_time = excluded.total_time,
                save_time = excluded.save_time,
                search_title = excluded.search_title
            "#,
            params![
                key,
                record.title,
                record.source_name,
                record.cover,
                record.year,
                record.index,
                record.total_episodes,
                play_time,
                total_time,
                record.save_time,
                record.search_title
            ],
        )?;
        Ok(())
    }

    pub fn setting(&self, name: &str) -> Result<Option<String>> {
        let value = self
            .conn()?
            .query_row(
                "SELECT value FROM settings WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, name: &str, value: &str) -> Result<()> {
        self.conn()?.execute(
            r#"
            INSERT INTO settings (name, value) VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET value = excluded.value
            "#,
            params![name, value],
        )?;
        Ok(())
    }
}

impl FavoritesStore for Database {
    fn all_favorites(&self) -> Result<Vec<(String, FavoriteRecord)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT storage_key, title, cover, year, total_episodes, source_name, search_title, save_time FROM favorites ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                FavoriteRecord {
                    title: row.get(1)?,
                    cover: row.get(2)?,
                    year: row.get(3)?,
                    total_episodes: row.get(4)?,
                    source_name: row.get(5)?,
                    search_title: row.get(6)?,
                    save_time: row.get(7)?,
                },
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn clear_favorites(&self) -> Result<()> {
        let removed = self.conn()?.execute("DELETE FROM favorites", [])?;
        debug!(removed, "cleared favorites");
        Ok(())
    }
}

impl PlayRecordStore for Database {
    fn all_play_records(&self) -> Result<HashMap<String, PlayRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT storage_key, title, source_name, cover, year, episode_index, total_episodes, play_time, total_time, save_time, search_title FROM play_records",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                PlayRecord {
                    title: row.get(1)?,
                    source_name: row.get(2)?,
                    cover: row.get(3)?,
                    year: row.get(4)?,
                    index: row.get(5)?,
                    total_episodes: row.get(6)?,
                    play_time: row.get::<_, i64>(7)?.max(0) as u64,
                    total_time: row.get::<_, i64>(8)?.max(0) as u64,
                    save_time: row.get(9)?,
                    search_title: row.get(10)?,
                },
            ))
        })?;

        let mut out = HashMap::new();
        for row in rows {
            let (key, record) = row?;
            out.insert(key, record);
        }
        Ok(out)
    }
}
