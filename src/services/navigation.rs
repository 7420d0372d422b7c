//! Window navigation and scroll-to-today resolution.
//!
//! Navigation shifts the visible window by a granularity-dependent step:
//! 7 days in day view, 4 weeks in week view, 3 months in month view, and
//! 2 quarters in quarter view. The bucket sequence is regenerated by the
//! engine after every shift.

use chrono::{Duration, Months, NaiveDate};

use crate::api::{Direction, ScrollTarget};
use crate::models::time::{DateWindow, TimeUnit};

/// Shift a window forward or backward by the unit's navigation step.
pub fn shift_window(window: &DateWindow, unit: TimeUnit, direction: Direction) -> DateWindow {
    match unit {
        TimeUnit::Day => shift_days(window, 7, direction),
        TimeUnit::Week => shift_days(window, 28, direction),
        TimeUnit::Month => shift_months(window, 3, direction),
        TimeUnit::Quarter => shift_months(window, 6, direction),
    }
}

fn shift_days(window: &DateWindow, days: i64, direction: Direction) -> DateWindow {
    let delta = match direction {
        Direction::Next => Duration::days(days),
        Direction::Prev => Duration::days(-days),
    };
    DateWindow::new(window.start + delta, window.end + delta)
}

fn shift_months(window: &DateWindow, months: u32, direction: Direction) -> DateWindow {
    let step = Months::new(months);
    let shift = |date: NaiveDate| match direction {
        Direction::Next => date.checked_add_months(step).unwrap_or(NaiveDate::MAX),
        Direction::Prev => date.checked_sub_months(step).unwrap_or(NaiveDate::MIN),
    };
    DateWindow::new(shift(window.start), shift(window.end))
}

/// Locate the bucket containing `today` and derive a scroll offset
/// proportional to its index. Returns `None` when today falls outside the
/// current sequence.
pub fn scroll_to_date(
    buckets: &[NaiveDate],
    unit: TimeUnit,
    today: NaiveDate,
) -> Option<ScrollTarget> {
    let index = buckets.iter().position(|&b| unit.contains(b, today))?;
    Some(ScrollTarget {
        index,
        fraction: index as f64 / buckets.len() as f64,
    })
}
