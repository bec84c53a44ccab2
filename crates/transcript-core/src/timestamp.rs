//! Timestamp normalization for the two encodings found in player links
//!
//! A raw timestamp is either a bare count of seconds (`"45"`) or an
//! `HH-MM-SS` triple (`"1-02-03"`). Both are coerced permissively: anything
//! that is not a number counts as zero instead of failing the line.

/// Normalize a raw link timestamp to seconds
pub fn normalize_timestamp(raw: &str) -> u64 {
    if !raw.contains('-') {
        return coerce_seconds(raw);
    }

    let mut parts = raw.split('-').map(coerce_seconds);
    let hours = parts.next().unwrap_or(0);
    let minutes = parts.next().unwrap_or(0);
    let seconds = parts.next().unwrap_or(0);

    hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
}

/// Leading decimal digits of `s` as a number; 0 when there are none
pub fn coerce_seconds(s: &str) -> u64 {
    s.trim_start()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}

/// Render seconds as H:MM:SS
pub fn format_clock(seconds: u64) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
