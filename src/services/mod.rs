//! Computation services for the timeline engine.
//!
//! These modules hold the pure date/position math: bucket sequence
//! generation, per-record position calculation, drag re-projection, and
//! window navigation. The [`crate::engine`] facade orchestrates them and
//! owns the memoization cache.

pub mod buckets;
pub mod navigation;
pub mod position;
pub mod reproject;

pub use buckets::generate_buckets;
pub use navigation::{scroll_to_date, shift_window};
pub use position::compute_position;
pub use reproject::reproject;
