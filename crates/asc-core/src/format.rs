//! Display formatting shared by the field registries

use chrono::{DateTime, Local, TimeZone, Utc};
use colored::{Color, Colorize};

/// Layout used for absolute timestamps, e.g. `2024-03-20 15:04:05 UTC`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Shown for an absent value
pub const PLACEHOLDER: &str = "-";

/// Format a timestamp in the local timezone, or "" when absent
pub fn timestamp(time: Option<&DateTime<Utc>>) -> String {
    time.map(|t| timestamp_in(t, &Local)).unwrap_or_default()
}

/// Format a timestamp in an explicit timezone
pub fn timestamp_in<Tz>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Human-friendly age of `time` relative to `now`
///
/// Anything a month or older falls back to an absolute local timestamp.
pub fn relative_time(time: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(*time);

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{} minutes ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{} hours ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{} days ago", diff.num_days())
    } else {
        timestamp_in(time, &Local)
    }
}

/// "Enabled" / "Disabled"
pub fn enabled(flag: bool) -> &'static str {
    if flag { "Enabled" } else { "Disabled" }
}

/// Optional flag; absent renders as `missing`
pub fn enabled_or(flag: Option<bool>, missing: &str) -> String {
    flag.map(|f| enabled(f).to_string())
        .unwrap_or_else(|| missing.to_string())
}

/// Value or placeholder when absent/empty
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Join a list for a single cell, or use the placeholder when empty
pub fn join_or(values: &[String], separator: &str, placeholder: &str) -> String {
    if values.is_empty() {
        placeholder.to_string()
    } else {
        values.join(separator)
    }
}

fn status_color(state: &str) -> Option<Color> {
    let color = match state.to_lowercase().as_str() {
        "active" | "available" | "attached" | "completed" | "healthy" | "in-sync"
        | "in-use" | "running" | "create-complete" | "modify-complete" => Color::Green,
        "backing-up" | "configuring-enhanced-monitoring" | "creating" | "maintenance"
        | "modifying" | "pending" | "rebooting" | "renaming" | "resetting-master-credentials"
        | "snapshotting" | "starting" | "stopping" | "storage-optimization" | "upgrading"
        | "create-in-progress" | "modify-in-progress" => Color::Yellow,
        "deleted" | "deleting" | "error" | "failed" | "incompatible-network"
        | "incompatible-parameters" | "inaccessible-encryption-credentials" | "restore-error"
        | "stopped" | "storage-full" | "create-failed" | "modify-failed" => Color::Red,
        _ => return None,
    };
    Some(color)
}

/// Colour a resource state: green when healthy, yellow when changing, red when down
pub fn status(state: &str) -> String {
    match status_color(state) {
        Some(color) => state.color(color).to_string(),
        None => state.to_string(),
    }
}

/// Remove ANSI SGR escape sequences
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// URL-decode a policy document and pretty-print it when it is JSON
pub fn policy_document(encoded: &str) -> String {
    let unplussed = encoded.replace('+', " ");
    let decoded = match urlencoding::decode(&unplussed) {
        Ok(d) => d.into_owned(),
        Err(_) => return encoded.to_string(),
    };

    match serde_json::from_str::<serde_json::Value>(&decoded) {
        Ok(value) if value.is_object() => {
            serde_json::to_string_pretty(&value).unwrap_or(decoded)
        }
        _ => decoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn test_timestamp_in_utc() {
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 15, 4, 5).unwrap();
        assert_eq!(timestamp_in(&t, &Utc), "2024-03-20 15:04:05 UTC");
        assert_eq!(timestamp(None), "");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = at(1_700_000_000);
        assert_eq!(relative_time(&(now - Duration::seconds(30)), &now), "just now");
        assert_eq!(
            relative_time(&(now - Duration::minutes(5)), &now),
            "5 minutes ago"
        );
        assert_eq!(relative_time(&(now - Duration::hours(3)), &now), "3 hours ago");
        assert_eq!(relative_time(&(now - Duration::days(12)), &now), "12 days ago");

        let old = now - Duration::days(90);
        assert_eq!(relative_time(&old, &now), timestamp_in(&old, &Local));
    }

    #[test]
    fn test_enabled_labels() {
        assert_eq!(enabled(true), "Enabled");
        assert_eq!(enabled(false), "Disabled");
        assert_eq!(enabled_or(None, ""), "");
        assert_eq!(enabled_or(Some(true), ""), "Enabled");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(or_placeholder(None, "Not configured"), "Not configured");
        assert_eq!(or_placeholder(Some(""), "-"), "-");
        assert_eq!(or_placeholder(Some("x"), "-"), "x");
        assert_eq!(join_or(&[], ", ", "-"), "-");
        assert_eq!(
            join_or(&["sg-1".to_string(), "sg-2".to_string()], ", ", "-"),
            "sg-1, sg-2"
        );
    }

    #[test]
    fn test_status_text_survives_colouring() {
        colored::control::set_override(true);
        let coloured = status("available");
        assert_ne!(coloured, "available");
        assert_eq!(strip_ansi(&coloured), "available");
        assert_eq!(status("some-unknown-state"), "some-unknown-state");
    }

    #[test]
    fn test_policy_document_is_decoded_and_pretty_printed() {
        let encoded = "%7B%22Version%22%3A%222012-10-17%22%2C%22Statement%22%3A%5B%5D%7D";
        let doc = policy_document(encoded);
        assert!(doc.contains("\"Version\": \"2012-10-17\""));
        assert!(doc.contains('\n'));

        assert_eq!(policy_document("not+json"), "not json");
    }
}
