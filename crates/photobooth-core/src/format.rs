//! Display formatters for byte counts and timestamps.

use chrono::{TimeZone, Utc};

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with the largest fitting unit out of B/KB/MB/GB.
///
/// Bytes are printed with no decimals, scaled units with one. Counts
/// past the gigabyte range stay in GB.
///
/// # Examples
/// ```
/// use photobooth_core::format_bytes;
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.0 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Format an epoch-millisecond instant as a UTC calendar date.
///
/// Deterministic for a given instant regardless of host locale or
/// timezone. Instants chrono cannot represent render as
/// `"invalid date"` instead of panicking.
pub fn format_date(epoch_ms: i64) -> String {
    match Utc.timestamp_millis_opt(epoch_ms).single() {
        Some(instant) => instant.format("%b %-d, %Y").to_string(),
        None => "invalid date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0 B")]
    #[case(500, "500 B")]
    #[case(1023, "1023 B")]
    #[case(1024, "1.0 KB")]
    #[case(1536, "1.5 KB")]
    #[case(1_048_576, "1.0 MB")]
    #[case(3_221_225_472, "3.0 GB")]
    fn byte_formatting(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(format_bytes(bytes), expected);
    }

    #[test]
    fn terabytes_clamp_to_gb() {
        assert_eq!(format_bytes(2 * 1024 * 1024 * 1024 * 1024), "2048.0 GB");
    }

    #[test]
    fn date_is_deterministic_utc() {
        // 2024-08-29T20:00:00Z
        assert_eq!(format_date(1_724_961_600_000), "Aug 29, 2024");
    }

    #[test]
    fn epoch_zero() {
        assert_eq!(format_date(0), "Jan 1, 1970");
    }

    #[test]
    fn out_of_range_instant_does_not_panic() {
        assert_eq!(format_date(i64::MAX), "invalid date");
    }
}
