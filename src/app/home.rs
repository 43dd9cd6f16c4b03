use anyhow::Result;
use tracing::debug;

use super::catalog::HotRows;
use super::favorites::{FavoriteItem, load_favorites};
use crate::store::{FavoritesStore, PlayRecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Home,
    Favorites,
}

/// Issued on tab activation; results carrying an outdated token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestToken {
    generation: u64,
}

#[derive(Debug)]
pub(crate) struct HomeView {
    active_tab: Tab,
    generation: u64,
    pub(crate) hot_rows: HotRows,
    pub(crate) favorites: Vec<FavoriteItem>,
}

impl HomeView {
    pub(crate) fn new() -> Self {
        Self {
            active_tab: Tab::Home,
            generation: 0,
            hot_rows: HotRows::default(),
            favorites: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Every activation invalidates in-flight results.
    fn activate(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.generation += 1;
    }

    pub(crate) fn activate_home(&mut self) {
        self.activate(Tab::Home);
    }

    /// The favorites list is reloaded on every activation; only the result
    /// carrying the returned token may be applied.
    pub(crate) fn activate_favorites(&mut self) -> RequestToken {
        self.activate(Tab::Favorites);
        RequestToken {
            generation: self.generation,
        }
    }

    pub(crate) fn apply_hot_rows(&mut self, rows: HotRows) {
        self.hot_rows = rows;
    }

    /// Returns false when the result was stale and discarded.
    pub(crate) fn apply_favorites(&mut self, token: RequestToken, items: Vec<FavoriteItem>) -> bool {
        if token.generation != self.generation || self.active_tab != Tab::Favorites {
            debug!(
                token = token.generation,
                current = self.generation,
                "discarding stale favorites result"
            );
            return false;
        }
        self.favorites = items;
        true
    }

    /// Activates the favorites tab and loads it from the stores.
    pub(crate) fn show_favorites(
        &mut self,
        favorites: &dyn FavoritesStore,
        play_records: &dyn PlayRecordStore,
    ) -> Result<()> {
        let token = self.activate_favorites();
        let items = load_favorites(favorites, play_records)?;
        self.apply_favorites(token, items);
        Ok(())
    }

    pub(crate) fn clear_favorites(&mut self, favorites: &dyn FavoritesStore) -> Result<()> {
        favorites.clear_favorites()?;
        self.favorites.clear();
        Ok(())
    }
}
