//! Calendar boundaries for the windowed totals.
//!
//! Boundaries are calendar dates in the reference instant's own time zone,
//! so "today" and "this month" follow the user's wall clock rather than UTC.
//! Boundaries are compared as local dates, never as constructed local
//! midnights.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

/// How far back the weekly window reaches, in whole days.
pub const WEEK_LOOKBACK_DAYS: u64 = 7;

/// Calendar date of `instant` as seen in `tz`.
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Day 1 of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Start of the day [`WEEK_LOOKBACK_DAYS`] before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(WEEK_LOOKBACK_DAYS))
        .unwrap_or(NaiveDate::MIN)
}

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    if month == 12 {
        return Some(31);
    }
    let next = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    u32::try_from(next.signed_duration_since(start).num_days()).ok()
}

/// The three nested windows around one reference instant.
#[derive(Debug, Clone)]
pub struct ReportWindows<Tz: TimeZone> {
    tz: Tz,
    until: DateTime<Utc>,
    today: NaiveDate,
    week_from: NaiveDate,
    month_from: NaiveDate,
}

impl<Tz: TimeZone> ReportWindows<Tz> {
    pub fn around(reference: &DateTime<Tz>) -> Self {
        let today = reference.date_naive();
        Self {
            tz: reference.timezone(),
            until: reference.with_timezone(&Utc),
            today,
            week_from: week_start(today),
            month_from: month_start(today),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.today.year(), self.today.month()).unwrap_or(31)
    }

    /// Days of the reference month up to and including the reference day.
    pub fn days_elapsed(&self) -> u32 {
        self.today.day()
    }

    /// Same local calendar day as the reference.
    pub fn is_today(&self, instant: &DateTime<Utc>) -> bool {
        local_date(instant, &self.tz) == self.today
    }

    pub fn in_week(&self, instant: &DateTime<Utc>) -> bool {
        *instant <= self.until && local_date(instant, &self.tz) >= self.week_from
    }

    /// Month to date: from local day 1 through the reference instant.
    pub fn in_month(&self, instant: &DateTime<Utc>) -> bool {
        *instant <= self.until && local_date(instant, &self.tz) >= self.month_from
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
