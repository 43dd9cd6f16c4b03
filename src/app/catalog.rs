use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::http::get_text;

pub(crate) const MOVIE_TYPE: &str = "电影";
pub(crate) const TV_TYPES: [&str; 5] = ["国产剧", "海外剧", "韩剧", "美剧", "日剧"];

const HOT_QUERY: [(&str, &str); 2] = [("order", "hits"), ("page", "1")];

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(String),
    #[error("catalog response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One entry of the catalog's `list` array after validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct CatalogItem {
    pub(crate) vod_name: String,
    #[serde(default)]
    pub(crate) vod_pic: String,
    #[serde(default)]
    pub(crate) type_name: String,
    #[serde(default)]
    pub(crate) vod_remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowItem {
    pub(crate) title: String,
    pub(crate) poster: String,
    pub(crate) remark: String,
}

impl From<&CatalogItem> for RowItem {
    fn from(item: &CatalogItem) -> Self {
        Self {
            title: item.vod_name.clone(),
            poster: item.vod_pic.clone(),
            remark: item.vod_remarks.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HotRows {
    pub(crate) movies: Vec<RowItem>,
    pub(crate) tv_shows: Vec<RowItem>,
}

/// Returns the valid items and how many entries were skipped.
/// A response without a `list` array is an empty catalog.
pub(crate) fn parse_catalog(raw: &str) -> Result<(Vec<CatalogItem>, usize), CatalogError> {
    let value: Value = serde_json::from_str(raw)?;
    let Some(entries) = value.get("list").and_then(Value::as_array) else {
        return Ok((Vec::new(), 0));
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for entry in entries {
        match CatalogItem::deserialize(entry) {
            Ok(item) if !item.vod_name.trim().is_empty() => items.push(item),
            Ok(_) => skipped += 1,
            Err(err) => {
                debug!(error = %err, "skipping malformed catalog entry");
                skipped += 1;
            }
        }
    }
    Ok((items, skipped))
}

/// First `limit` items whose type is one of `type_names`, in catalog order.
pub(crate) fn row_for_types(items: &[CatalogItem], type_names: &[&str], limit: usize) -> Vec<RowItem> {
    items
        .iter()
        .filter(|item| type_names.contains(&item.type_name.as_str()))
        .take(limit)
        .map(RowItem::from)
        .collect()
}

/// Genre-filtered row for a single catalog type label.
pub(crate) fn hot_rows_for(items: &[CatalogItem], type_name: &str, limit: usize) -> Vec<RowItem> {
    row_for_types(items, &[type_name], limit)
}

pub(crate) fn split_hot_rows(items: &[CatalogItem], limit: usize) -> HotRows {
    HotRows {
        movies: hot_rows_for(items, MOVIE_TYPE, limit),
        tv_shows: row_for_types(items, &TV_TYPES, limit),
    }
}

pub(crate) fn fetch_catalog(config: &Config) -> Result<Vec<CatalogItem>, CatalogError> {
    let body = get_text(
        &config.catalog_url,
        &HOT_QUERY,
        config.connect_timeout,
        config.read_timeout,
    )
    .map_err(CatalogError::Http)?;
    let (items, skipped) = parse_catalog(&body)?;
    info!(items = items.len(), skipped, "fetched hot catalog");
    Ok(items)
}

/// Fetch failures are logged and produce empty rows.
pub(crate) fn fetch_hot_rows(config: &Config) -> HotRows {
    match fetch_catalog(config) {
        Ok(items) => split_hot_rows(&items, config.row_limit),
        Err(err) => {
            error!(error = %err, url = %config.catalog_url, "failed to load hot content");
            HotRows::default()
        }
    }
}
