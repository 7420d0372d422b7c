//! Drag re-projection.
//!
//! When a record is dropped onto a bucket, its span is re-anchored to that
//! bucket while preserving its duration in days. For week, month, and quarter
//! granularity the new end date then snaps to the end of the unit containing
//! it, so a bar always fills whole buckets. The engine never persists the new
//! span; it is emitted to the caller.

use chrono::NaiveDate;

use crate::api::ReprojectedSpan;
use crate::models::time::TimeUnit;

/// Re-anchor a record span onto the bucket at `index`.
///
/// The new start is the bucket's anchor date. The new end preserves the
/// original day-count duration, then snaps to the end of the containing unit
/// for week/month/quarter granularity. Spans whose end precedes their start
/// and out-of-bounds indices yield `None`.
pub fn reproject(
    start: NaiveDate,
    end: NaiveDate,
    buckets: &[NaiveDate],
    index: usize,
    unit: TimeUnit,
) -> Option<ReprojectedSpan> {
    if end < start {
        return None;
    }
    let anchor = *buckets.get(index)?;

    let duration = end - start;
    let raw_end = anchor + duration;
    let new_end = match unit {
        TimeUnit::Day => raw_end,
        TimeUnit::Week | TimeUnit::Month | TimeUnit::Quarter => unit.end_of(raw_end),
    };

    Some(ReprojectedSpan {
        start: anchor,
        end: new_end.max(anchor),
    })
}

/// Duration of a span in whole days.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
