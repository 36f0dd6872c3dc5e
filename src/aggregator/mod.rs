//! Aggregation of trace rows into collapsed-stack frame totals.
//!
//! This module transforms raw InfluxDB trace series into:
//! - Renderer-friendly frame names (`outer:0042;inner:0007`)
//! - Per-frame sample totals, merged and sorted by name
//! - Filtered output with excluded frames removed

pub mod filter;
pub mod frame_name;
pub mod trace_table;

// Re-export main types and functions
pub use filter::ExclusionFilterSet;
pub use frame_name::{format_frame_name, is_self_counter};
pub use trace_table::{aggregate, FrameTotal};
