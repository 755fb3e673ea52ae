#[cfg(test)]
#[path = "format_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;

const SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

fn parse_timestamp(date: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.with_timezone(&Utc).naive_utc());
    }

    let trimmed = date.trim_end_matches('Z');
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }

    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return parsed.and_hms_opt(0, 0, 0);
    }

    return None;
}

/// Formats backend timestamps as `January 1, 2024 - 9:05`. Unparseable
/// values are returned untouched.
pub fn format_datetime(date: &str) -> String {
    if let Some(parsed) = parse_timestamp(date) {
        return parsed.format("%B %-d, %Y - %-H:%M").to_string();
    }

    return date.to_string();
}

/// Human readable size using base 10 units, e.g. `1.5 MB`.
pub fn format_filesize(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{bytes} B");
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    return format!("{trimmed} {}", SIZE_UNITS[unit]);
}
