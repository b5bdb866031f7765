//! 表示用日付と並び替えキー
//!
//! 表示文字列はローカルタイム。並び替えは UTC の DateTime で比較し、解析できない日付は
//! 「最も古い」扱い（None）にする。

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::cmp::Ordering;

/// 解析できない日付の表示
pub const INVALID_DATE: &str = "Invalid Date";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y @ %I:%M:%S %p",
];

/// epoch ミリ秒を UTC の DateTime に
pub fn datetime_from_ms(ms: u64) -> Option<DateTime<Utc>> {
    match Utc.timestamp_millis_opt(i64::try_from(ms).ok()?) {
        LocalResult::Single(dt) => Some(dt),
        _ => None,
    }
}

/// ローカルエントリの表示日付（例: 1/2/2024）
pub fn local_date_string(ms: u64) -> String {
    match datetime_from_ms(ms) {
        Some(dt) => dt.with_timezone(&Local).format("%-m/%-d/%Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// ISO8601（ミリ秒・Z 付き）例: 2024-01-02T03:04:05.000Z
pub fn iso_timestamp(ms: u64) -> String {
    match datetime_from_ms(ms) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => INVALID_DATE.to_string(),
    }
}

/// リモートエントリの表示日付（例: 1/2/2024 @ 3:04:05 AM）
pub fn remote_display(dt: Option<DateTime<Utc>>) -> String {
    match dt {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%-m/%-d/%Y @ %-I:%M:%S %p")
            .to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 日付文字列を解析する
///
/// RFC3339 はそのまま、タイムゾーンなしの日時と M/D/YYYY はローカル時刻、
/// YYYY-MM-DD のみは UTC の 0 時として扱う。
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_utc(naive);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return d.and_hms_opt(0, 0, 0).and_then(local_to_utc);
    }
    None
}

/// 新しい順の比較。None（解析不能）は常に後ろ。
pub fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(dt.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_parse_server_format_is_local_time() {
        let dt = parse_date("2024-05-06 07:08:09").unwrap();
        let naive = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(dt, local_to_utc(naive).unwrap());
    }

    #[test]
    fn test_parse_display_formats_round_trip_to_day() {
        let ms = 1_700_000_000_000;
        let shown = local_date_string(ms);
        let parsed = parse_date(&shown).unwrap();
        let original = datetime_from_ms(ms).unwrap().with_timezone(&Local);
        assert_eq!(parsed.with_timezone(&Local).date_naive(), original.date_naive());
    }

    #[test]
    fn test_remote_display_parses_back() {
        let dt = parse_date("2024-01-01T12:34:56Z");
        let shown = remote_display(dt);
        assert!(shown.contains(" @ "));
        assert_eq!(parse_date(&shown), dt);
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(remote_display(None), INVALID_DATE);
    }

    #[test]
    fn test_iso_timestamp_has_millis_and_z() {
        assert_eq!(iso_timestamp(1_700_000_000_000), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_newest_first_puts_invalid_last() {
        let older = parse_date("2024-01-01T00:00:00Z");
        let newer = parse_date("2024-02-01T00:00:00Z");
        assert_eq!(newest_first(newer, older), Ordering::Less);
        assert_eq!(newest_first(None, older), Ordering::Greater);
        assert_eq!(newest_first(None, None), Ordering::Equal);
    }
}
