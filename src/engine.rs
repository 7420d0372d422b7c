//! Timeline engine facade.
//!
//! Ties the computation services together behind one stateful type: holds the
//! caller's accessors and flags, the current window and granularity, and a
//! memoization cache for the bucket sequence and per-record positions keyed
//! by `(window, unit, record checksum)`. All computation is synchronous and
//! re-run on demand; every input degrades to empty/absent output rather than
//! raising errors.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use log::{debug, trace};
use parking_lot::RwLock;
use serde_json::Value;

use crate::api::{
    Direction, Position, RecordId, ReprojectedSpan, ScrollTarget, TimelineData, TimelineRow,
};
use crate::config::TimelineConfig;
use crate::models::record::{record_checksum, FieldAccessor};
use crate::models::time::{DateWindow, TimeUnit};
use crate::services::{buckets, navigation, position, reproject};

/// Callback invoked when a drop re-projection succeeds. Persistence of the
/// new span is the caller's responsibility.
pub type DropCallback = Arc<dyn Fn(&RecordId, &ReprojectedSpan) + Send + Sync>;

/// Caller-supplied engine configuration: field accessors and flags.
#[derive(Clone)]
pub struct EngineOptions {
    /// Accessor for the record identifier
    pub id: FieldAccessor,
    /// Accessor for the row label
    pub label: FieldAccessor,
    /// Accessor for the start date
    pub start: FieldAccessor,
    /// Accessor for the end date
    pub end: FieldAccessor,
    /// Include records without a position as rows with an undefined position
    pub force_unscheduled: bool,
    /// Invoked after a successful drop re-projection
    pub on_drop: Option<DropCallback>,
}

impl EngineOptions {
    /// Build name-based accessors from a configuration file.
    pub fn from_config(config: &TimelineConfig) -> Self {
        Self {
            id: FieldAccessor::by_name(config.fields.id.clone()),
            label: FieldAccessor::by_name(config.fields.label.clone()),
            start: FieldAccessor::by_name(config.fields.start.clone()),
            end: FieldAccessor::by_name(config.fields.end.clone()),
            force_unscheduled: config.timeline.force_unscheduled,
            on_drop: None,
        }
    }

    /// Attach a drop callback.
    pub fn with_on_drop(mut self, callback: DropCallback) -> Self {
        self.on_drop = Some(callback);
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_config(&TimelineConfig::default())
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("force_unscheduled", &self.force_unscheduled)
            .field("on_drop", &self.on_drop.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    window: DateWindow,
    unit: TimeUnit,
}

#[derive(Default)]
struct Cache {
    key: Option<CacheKey>,
    buckets: Vec<NaiveDate>,
    /// Position per record checksum; `None` entries memoize "no position"
    positions: HashMap<String, Option<Position>>,
}

/// The timeline positioning engine.
pub struct TimelineEngine {
    options: EngineOptions,
    window: DateWindow,
    unit: TimeUnit,
    cache: RwLock<Cache>,
}

impl TimelineEngine {
    /// Create an engine with explicit options, window, and granularity.
    pub fn new(options: EngineOptions, window: DateWindow, unit: TimeUnit) -> Self {
        Self {
            options,
            window,
            unit,
            cache: RwLock::new(Cache::default()),
        }
    }

    /// Create an engine from a configuration file, with the default window
    /// centered on today.
    pub fn from_config(config: &TimelineConfig) -> Self {
        let window = DateWindow::around(
            Utc::now().date_naive(),
            config.timeline.months_before,
            config.timeline.months_after,
        );
        Self::new(EngineOptions::from_config(config), window, config.timeline.unit)
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Change the granularity unit. The cache is rebuilt on the next access.
    pub fn set_unit(&mut self, unit: TimeUnit) {
        if self.unit != unit {
            debug!("Switching timeline unit {:?} -> {:?}", self.unit, unit);
            self.unit = unit;
        }
    }

    /// Change the visible window. The cache is rebuilt on the next access.
    pub fn set_window(&mut self, window: DateWindow) {
        if self.window != window {
            debug!(
                "Moving timeline window to [{}, {}]",
                window.start, window.end
            );
            self.window = window;
        }
    }

    /// The current bucket anchor sequence, for header rendering.
    pub fn buckets(&self) -> Vec<NaiveDate> {
        self.ensure_cache();
        self.cache.read().buckets.clone()
    }

    /// Shift the visible window by the unit's navigation step and regenerate
    /// the bucket sequence.
    pub fn navigate(&mut self, direction: Direction) {
        let shifted = navigation::shift_window(&self.window, self.unit, direction);
        debug!(
            "Navigating {:?}: window [{}, {}] -> [{}, {}]",
            direction, self.window.start, self.window.end, shifted.start, shifted.end
        );
        self.window = shifted;
        self.ensure_cache();
    }

    /// Scroll offset for the bucket containing today; `None` when today is
    /// outside the current window.
    pub fn scroll_to_today(&self) -> Option<ScrollTarget> {
        self.scroll_to_date(Utc::now().date_naive())
    }

    /// Scroll offset for the bucket containing an arbitrary date.
    pub fn scroll_to_date(&self, date: NaiveDate) -> Option<ScrollTarget> {
        self.ensure_cache();
        navigation::scroll_to_date(&self.cache.read().buckets, self.unit, date)
    }

    /// Annotate a record collection with computed positions.
    ///
    /// Rows cover every positioned record; records without a defined position
    /// (missing dates or out of range) are included only when the `force`
    /// flag is set, with `position` absent.
    pub fn annotate(&self, records: &[Value]) -> TimelineData {
        self.ensure_cache();

        let mut rows = Vec::with_capacity(records.len());
        let mut positioned_count = 0;
        let mut seen = HashSet::new();
        for record in records {
            let start = self.options.start.resolve_date(record);
            let end = self.options.end.resolve_date(record);
            let position = match (start, end) {
                (Some(start), Some(end)) => {
                    let checksum = record_checksum(record);
                    let position = self.position_for(&checksum, start, end);
                    seen.insert(checksum);
                    position
                }
                _ => None,
            };

            if position.is_some() {
                positioned_count += 1;
            } else if !self.options.force_unscheduled {
                continue;
            }

            let label = self.options.label.resolve_string(record).unwrap_or_default();
            rows.push(TimelineRow {
                id: self.record_id(record),
                label,
                start,
                end,
                position,
                record: record.clone(),
            });
        }

        // Edited records produce a new checksum; drop the superseded entries
        // so the memoization map tracks the live record set.
        self.cache
            .write()
            .positions
            .retain(|checksum, _| seen.contains(checksum));

        let cache = self.cache.read();
        TimelineData {
            unit: self.unit,
            window: self.window,
            buckets: cache.buckets.clone(),
            rows,
            total_count: records.len(),
            positioned_count,
        }
    }

    /// Re-project a record dropped onto the bucket at `index` and emit the
    /// new span through the drop callback. Returns `None` (and stays silent)
    /// for invalid targets or records without both dates.
    pub fn drop_on_bucket(&self, record: &Value, index: usize) -> Option<ReprojectedSpan> {
        self.ensure_cache();
        let start = self.options.start.resolve_date(record)?;
        let end = self.options.end.resolve_date(record)?;
        let span = {
            let cache = self.cache.read();
            reproject::reproject(start, end, &cache.buckets, index, self.unit)?
        };

        let id = self.record_id(record);
        debug!(
            "Re-projected record {} onto bucket {}: [{}, {}]",
            id, index, span.start, span.end
        );
        if let Some(callback) = &self.options.on_drop {
            callback(&id, &span);
        }
        Some(span)
    }

    /// Regenerate the cache when the window or unit changed since the last
    /// computation.
    fn ensure_cache(&self) {
        let key = CacheKey {
            window: self.window,
            unit: self.unit,
        };
        if self.cache.read().key == Some(key) {
            return;
        }

        let mut cache = self.cache.write();
        // Another writer may have rebuilt the cache while we waited.
        if cache.key == Some(key) {
            return;
        }
        cache.buckets = buckets::generate_buckets(&self.window, self.unit);
        cache.positions.clear();
        cache.key = Some(key);
        debug!(
            "Regenerated {} {:?} buckets for window [{}, {}]",
            cache.buckets.len(),
            self.unit,
            self.window.start,
            self.window.end
        );
    }

    /// Resolved record identifier, falling back to the record's checksum so
    /// both `annotate` and `drop_on_bucket` name a record the same way.
    fn record_id(&self, record: &Value) -> RecordId {
        RecordId::new(
            self.options
                .id
                .resolve_string(record)
                .unwrap_or_else(|| record_checksum(record)),
        )
    }

    /// Memoized position lookup keyed by the record's checksum.
    fn position_for(&self, checksum: &str, start: NaiveDate, end: NaiveDate) -> Option<Position> {
        if let Some(hit) = self.cache.read().positions.get(checksum) {
            return hit.clone();
        }

        let computed = {
            let cache = self.cache.read();
            position::compute_position(start, end, &cache.buckets, self.unit)
        };
        trace!(
            "Computed position for record checksum {}: {:?}",
            &checksum[..8.min(checksum.len())],
            computed
        );
        self.cache
            .write()
            .positions
            .insert(checksum.to_string(), computed.clone());
        computed
    }
}
