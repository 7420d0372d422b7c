//! Calendar granularity units and the visible window.
//!
//! All stepping and containment here is calendar-aware: week buckets are
//! aligned to Monday (ISO weeks), month and quarter buckets to calendar
//! boundaries. Day-count arithmetic is only used for the day unit itself.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Time granularity controlling bucket size and containment rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Quarter,
}

impl TimeUnit {
    /// Anchor date of the bucket containing `date`.
    ///
    /// Day buckets anchor on the date itself, week buckets on the Monday of
    /// the ISO week, month buckets on the first of the month, and quarter
    /// buckets on the first day of the calendar quarter.
    pub fn align(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeUnit::Day => date,
            TimeUnit::Week => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            TimeUnit::Month => date.with_day(1).unwrap_or(date),
            TimeUnit::Quarter => {
                let quarter_month = (date.month0() / 3) * 3 + 1;
                date.with_day(1)
                    .and_then(|d| d.with_month(quarter_month))
                    .unwrap_or(date)
            }
        }
    }

    /// Anchor date of the bucket following `anchor`.
    pub fn advance(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            TimeUnit::Day => anchor + Duration::days(1),
            TimeUnit::Week => anchor + Duration::days(7),
            TimeUnit::Month => anchor
                .checked_add_months(Months::new(1))
                .unwrap_or(NaiveDate::MAX),
            TimeUnit::Quarter => anchor
                .checked_add_months(Months::new(3))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Check whether `date` falls inside the bucket anchored at `anchor`.
    ///
    /// Containment is same-day / same-ISO-week / same-month / same-quarter.
    pub fn contains(&self, anchor: NaiveDate, date: NaiveDate) -> bool {
        match self {
            TimeUnit::Day => anchor == date,
            TimeUnit::Week => anchor.iso_week() == date.iso_week(),
            TimeUnit::Month => anchor.year() == date.year() && anchor.month() == date.month(),
            TimeUnit::Quarter => {
                anchor.year() == date.year() && anchor.month0() / 3 == date.month0() / 3
            }
        }
    }

    /// Last calendar day of the bucket containing `date`.
    pub fn end_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeUnit::Day => date,
            TimeUnit::Week => self.align(date) + Duration::days(6),
            TimeUnit::Month | TimeUnit::Quarter => {
                self.advance(self.align(date)) - Duration::days(1)
            }
        }
    }
}

/// Caller-controlled visible date range, independent of the dataset's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First visible date (inclusive)
    pub start: NaiveDate,
    /// Last visible date (inclusive)
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window spanning `months_before` months before to `months_after` months
    /// after the given anchor date.
    pub fn around(anchor: NaiveDate, months_before: u32, months_after: u32) -> Self {
        let start = anchor
            .checked_sub_months(Months::new(months_before))
            .unwrap_or(NaiveDate::MIN);
        let end = anchor
            .checked_add_months(Months::new(months_after))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// A window is malformed when its start lies after its end; it yields an
    /// empty bucket sequence rather than an error.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Check if a date lies inside the window (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
