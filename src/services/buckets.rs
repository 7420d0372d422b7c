//! Bucket sequence generation.
//!
//! Produces the ordered list of bucket anchor dates covering a visible
//! window for a granularity unit. Anchors use calendar-aware stepping, so the
//! first anchor may precede the window start (e.g. the Monday of a week that
//! begins mid-window).

use chrono::NaiveDate;

use crate::models::time::{DateWindow, TimeUnit};

/// Generate the ordered, deduplicated bucket anchor sequence covering
/// `window` inclusive.
///
/// A malformed window (start after end) yields an empty sequence; it is a
/// defined state, not an error.
pub fn generate_buckets(window: &DateWindow, unit: TimeUnit) -> Vec<NaiveDate> {
    if window.is_empty() {
        return Vec::new();
    }

    let mut anchors = Vec::new();
    let mut cursor = unit.align(window.start);
    while cursor <= window.end {
        // Stepping is strictly increasing, so the guard only matters if a
        // caller-supplied alignment ever repeats an anchor.
        if anchors.last() != Some(&cursor) {
            anchors.push(cursor);
        }
        cursor = unit.advance(cursor);
    }
    anchors
}
