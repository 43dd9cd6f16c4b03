use anyhow::Result;
use tracing::info;

use crate::db::{Database, SEEN_ANNOUNCEMENT_SETTING};

/// Shown until the user dismisses this exact text.
pub(crate) fn should_show(announcement: Option<&str>, seen: Option<&str>) -> bool {
    match announcement {
        Some(text) if !text.is_empty() => seen != Some(text),
        _ => false,
    }
}

pub(crate) fn pending_announcement<'a>(
    db: &Database,
    announcement: Option<&'a str>,
) -> Result<Option<&'a str>> {
    let seen = db.setting(SEEN_ANNOUNCEMENT_SETTING)?;
    Ok(announcement.filter(|text| should_show(Some(text), seen.as_deref())))
}

pub(crate) fn dismiss(db: &Database, announcement: &str) -> Result<()> {
    db.set_setting(SEEN_ANNOUNCEMENT_SETTING, announcement)?;
    info!("announcement dismissed");
    Ok(())
}
