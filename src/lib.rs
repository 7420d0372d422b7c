//! # Ganttline
//!
//! Calendar-timeline positioning engine for Gantt-style project boards.
//!
//! Given a collection of records with start/end dates and a chosen time
//! granularity (day, ISO week, month, quarter), the engine computes the
//! ordered sequence of granularity buckets covering a visible window and, for
//! each record, its left-offset/width as percentages of that sequence, ready
//! for drag-and-drop Gantt rendering.
//!
//! ## Features
//!
//! - **Bucket Generation**: calendar-aligned anchor dates covering the window
//! - **Position Calculation**: `{left, width}` percentage pairs per record
//! - **Drag Re-projection**: drop onto a bucket, get the new start/end span
//! - **Navigation**: granularity-dependent window stepping and scroll-to-today
//! - **Field Accessors**: records stay arbitrary JSON; dates resolve by field
//!   name or derivation function
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) exposed to callers
//! - [`models`]: granularity units, the visible window, and record access
//! - [`services`]: the pure date/position math
//! - [`engine`]: the stateful facade with the memoization cache
//! - [`config`]: TOML configuration with environment overrides
//!
//! The engine has no network or storage surface; it is purely in-process.
//! Missing or out-of-range dates degrade to "not rendered" rather than
//! raising errors.

pub mod api;
pub mod config;
pub mod engine;
pub mod models;
pub mod services;

pub use api::{
    Direction, Position, RecordId, ReprojectedSpan, ScrollTarget, TimelineData, TimelineRow,
};
pub use config::{ConfigError, TimelineConfig};
pub use engine::{DropCallback, EngineOptions, TimelineEngine};
pub use models::record::FieldAccessor;
pub use models::time::{DateWindow, TimeUnit};
