//! Public API surface for the timeline engine.
//!
//! This file consolidates the DTO types exchanged with callers.
//! All types derive Serialize/Deserialize for JSON serialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::models::record::FieldAccessor;
pub use crate::models::time::{DateWindow, TimeUnit};

/// Record identifier (opaque, as supplied by the caller's dataset).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        RecordId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Navigation direction for window shifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Percentage pair describing where a record's bar renders within the bucket
/// sequence. Derived state only; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Left offset as a percentage string, e.g. `"33.33%"`
    pub left: String,
    /// Bar width as a percentage string, e.g. `"33.33%"`
    pub width: String,
}

impl Position {
    /// Build a position from inclusive start/end bucket indices.
    ///
    /// Callers must pass `start_index <= end_index`; reversed indices clamp
    /// to a single-bucket width rather than wrapping.
    pub fn from_indices(start_index: usize, end_index: usize, bucket_count: usize) -> Self {
        debug_assert!(
            start_index <= end_index,
            "start index must not exceed end index"
        );
        let count = bucket_count as f64;
        let left = start_index as f64 / count * 100.0;
        let width = (end_index.saturating_sub(start_index) + 1) as f64 / count * 100.0;
        Self {
            left: format_percent(left),
            width: format_percent(width),
        }
    }
}

/// Format a percentage value the way the board renders it.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// New start/end span produced by a drag re-projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReprojectedSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Scroll request targeting the bucket containing a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollTarget {
    /// Index of the containing bucket within the sequence
    pub index: usize,
    /// Offset proportional to the index, in `[0, 1)`
    pub fraction: f64,
}

/// One annotated record row, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineRow {
    pub id: RecordId,
    pub label: String,
    /// Resolved start date, if the record has one
    pub start: Option<NaiveDate>,
    /// Resolved end date, if the record has one
    pub end: Option<NaiveDate>,
    /// Computed position; absent for unscheduled or out-of-range records
    pub position: Option<Position>,
    /// The original record, for the caller's own rendering
    pub record: serde_json::Value,
}

/// Annotated timeline dataset: the full surface exposed to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineData {
    pub unit: TimeUnit,
    pub window: DateWindow,
    /// Ordered bucket anchor dates, for header rendering
    pub buckets: Vec<NaiveDate>,
    /// Annotated record rows, for row rendering
    pub rows: Vec<TimelineRow>,
    pub total_count: usize,
    pub positioned_count: usize,
}
