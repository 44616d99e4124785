#![allow(clippy::unwrap_used)]

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── days_in_month ─────────────────────────────────────────────

#[test]
fn test_days_in_month_regular() {
    assert_eq!(days_in_month(2026, 1), Some(31));
    assert_eq!(days_in_month(2026, 4), Some(30));
    assert_eq!(days_in_month(2026, 12), Some(31));
}

#[test]
fn test_days_in_month_february() {
    assert_eq!(days_in_month(2026, 2), Some(28));
    assert_eq!(days_in_month(2024, 2), Some(29));
    assert_eq!(days_in_month(1900, 2), Some(28));
    assert_eq!(days_in_month(2000, 2), Some(29));
}

#[test]
fn test_days_in_month_invalid() {
    assert_eq!(days_in_month(2026, 0), None);
    assert_eq!(days_in_month(2026, 13), None);
}

// ── boundaries ────────────────────────────────────────────────

#[test]
fn test_month_start() {
    assert_eq!(month_start(date(2026, 2, 17)), date(2026, 2, 1));
    assert_eq!(month_start(date(2026, 2, 1)), date(2026, 2, 1));
}

#[test]
fn test_week_start_crosses_month() {
    assert_eq!(week_start(date(2026, 2, 3)), date(2026, 1, 27));
    assert_eq!(week_start(date(2026, 3, 1)), date(2026, 2, 22));
}

#[test]
fn test_local_date_uses_time_zone() {
    // 2026-02-03 02:00 UTC is still Feb 2 in New York
    let instant = Utc.with_ymd_and_hms(2026, 2, 3, 2, 0, 0).unwrap();
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    assert_eq!(local_date(&instant, &new_york), date(2026, 2, 2));
    assert_eq!(local_date(&instant, &Utc), date(2026, 2, 3));
}

// ── ReportWindows ─────────────────────────────────────────────

#[test]
fn test_windows_today_is_local_calendar_day() {
    let tz = FixedOffset::east_opt(9 * 3600).unwrap();
    let reference = tz.with_ymd_and_hms(2026, 2, 3, 12, 0, 0).unwrap();
    let windows = ReportWindows::around(&reference);

    let local_morning = tz.with_ymd_and_hms(2026, 2, 3, 0, 30, 0).unwrap();
    let local_yesterday = tz.with_ymd_and_hms(2026, 2, 2, 23, 59, 59).unwrap();
    assert!(windows.is_today(&local_morning.with_timezone(&Utc)));
    assert!(!windows.is_today(&local_yesterday.with_timezone(&Utc)));
}

#[test]
fn test_windows_week_boundary_is_start_of_day() {
    let reference = Utc.with_ymd_and_hms(2026, 2, 10, 18, 0, 0).unwrap();
    let windows = ReportWindows::around(&reference);

    let first_included = Utc.with_ymd_and_hms(2026, 2, 3, 0, 0, 0).unwrap();
    let last_excluded = Utc.with_ymd_and_hms(2026, 2, 2, 23, 59, 59).unwrap();
    assert!(windows.in_week(&first_included));
    assert!(!windows.in_week(&last_excluded));
}

#[test]
fn test_windows_exclude_after_reference() {
    let reference = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();
    let windows = ReportWindows::around(&reference);

    let later_today = Utc.with_ymd_and_hms(2026, 2, 10, 18, 0, 0).unwrap();
    assert!(windows.in_month(&reference));
    assert!(windows.in_week(&reference));
    assert!(!windows.in_month(&later_today));
    assert!(!windows.in_week(&later_today));
    assert!(windows.is_today(&later_today));
}

#[test]
fn test_windows_month_starts_on_local_day_one() {
    let tz = FixedOffset::west_opt(5 * 3600).unwrap();
    let reference = tz.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap();
    let windows = ReportWindows::around(&reference);

    // Feb 1 00:30 local is Feb 1 05:30 UTC; Jan 31 23:30 local is Feb 1 04:30 UTC
    let local_day_one = tz.with_ymd_and_hms(2026, 2, 1, 0, 30, 0).unwrap();
    let local_jan_31 = tz.with_ymd_and_hms(2026, 1, 31, 23, 30, 0).unwrap();
    assert!(windows.in_month(&local_day_one.with_timezone(&Utc)));
    assert!(!windows.in_month(&local_jan_31.with_timezone(&Utc)));
}

#[test]
fn test_windows_day_counts() {
    let reference = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
    let windows = ReportWindows::around(&reference);
    assert_eq!(windows.today(), date(2024, 2, 10));
    assert_eq!(windows.days_in_month(), 29);
    assert_eq!(windows.days_elapsed(), 10);
}
