//! src/util/humanize.rs

use chrono::{DateTime, Utc};
use std::time::Duration;

/// "1d 2h 3m"; anything under a minute is "<1m".
pub fn human_duration(duration: Duration) -> String {
    let total_minutes = duration.as_secs() / 60;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let mut parts: Vec<String> = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }

    if parts.is_empty() {
        "<1m".to_string()
    } else {
        parts.join(" ")
    }
}

/// Timestamp plus its age relative to `now`, or "unknown".
pub fn relative_timestamp(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return "unknown".to_string();
    };
    let age = (now - at).abs().to_std().unwrap_or_default();
    format!(
        "{} ({} ago)",
        at.format("%Y-%m-%d %H:%M:%S"),
        human_duration(age)
    )
}

/// Short interval label: "30s", "5m", "1m30s".
pub fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs == 0 {
        return format!("{}ms", interval.as_millis());
    }
    match (secs / 60, secs % 60) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m{s}s"),
    }
}
