//! Position calculation.
//!
//! Maps a record's start/end dates onto the bucket sequence as a
//! `{left, width}` percentage pair. Missing or out-of-range dates degrade to
//! "no position" rather than raising errors.

use chrono::NaiveDate;

use crate::api::Position;
use crate::models::time::TimeUnit;

/// Compute a record's position within the bucket sequence.
///
/// Scans the sequence linearly: the first bucket containing the start date
/// and the last bucket containing the end date bound the bar. When a start
/// date falls exactly on a bucket boundary it belongs to the bucket it starts
/// within (first-match-wins). Returns `None` when either boundary has no
/// containing bucket, or when the dates are reversed.
pub fn compute_position(
    start: NaiveDate,
    end: NaiveDate,
    buckets: &[NaiveDate],
    unit: TimeUnit,
) -> Option<Position> {
    if buckets.is_empty() {
        return None;
    }

    let start_index = buckets.iter().position(|&b| unit.contains(b, start))?;
    let end_index = buckets.iter().rposition(|&b| unit.contains(b, end))?;
    if end_index < start_index {
        return None;
    }

    Some(Position::from_indices(start_index, end_index, buckets.len()))
}
