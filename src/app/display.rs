use chrono::{DateTime, Local};

pub(crate) fn truncate(s: &str, max: usize) -> String {
    let mut out = s.to_string();
    if out.chars().count() > max {
        out = out.chars().take(max.saturating_sub(3)).collect::<String>() + "...";
    }
    out
}

pub(crate) fn format_saved_at(save_time_ms: i64) -> String {
    DateTime::from_timestamp_millis(save_time_ms)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M %:z")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// `3/24`, `3/?` when the total is unknown, `-` when never watched.
pub(crate) fn episode_progress(current: Option<u32>, total: u32) -> String {
    match (current, total) {
        (None, _) => "-".to_string(),
        (Some(current), 0) => format!("{current}/?"),
        (Some(current), total) => format!("{current}/{total}"),
    }
}
