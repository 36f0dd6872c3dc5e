//! Aggregate raw trace rows into sorted per-frame totals.
//!
//! Several raw keys can format to the same frame name (for example
//! `b-2` and `b-02`), so totals are merged by formatted name before
//! sorting and filtering.

use super::filter::ExclusionFilterSet;
use super::frame_name::{format_frame_name, is_self_counter};
use crate::influx::RawSeriesRow;
use crate::utils::error::FormatError;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// Accumulated samples for one formatted frame name
///
/// **Public** - one line of an exported file
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTotal {
    /// Semicolon-delimited stack, outermost frame first
    pub frame: String,

    /// Sum of all samples merged into this frame
    pub total: f64,
}

impl FrameTotal {
    pub fn new(frame: impl Into<String>, total: f64) -> Self {
        Self {
            frame: frame.into(),
            total,
        }
    }

    /// Total as written to disk (truncated toward zero)
    pub fn count(&self) -> i64 {
        self.total.trunc() as i64
    }
}

impl fmt::Display for FrameTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.frame, self.count())
    }
}

/// Aggregate trace rows into sorted, filtered frame totals
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `rows` - Trace rows returned by the wildcard query
/// * `strip_prefix` - Trace metric prefix (e.g. `cpu.trace.`)
/// * `filters` - Frames containing any of these substrings are dropped
///
/// # Returns
/// Frame totals sorted by frame name, ascending
///
/// # Errors
/// * `FormatError` - a row name does not follow the trace naming convention
///
/// # Algorithm
/// 1. Skip `<prefix><digits>` counter rows
/// 2. Format each remaining name and sum its samples
/// 3. Merge totals by formatted name
/// 4. Sort by name, then drop excluded frames
pub fn aggregate(
    rows: &[RawSeriesRow],
    strip_prefix: &str,
    filters: &ExclusionFilterSet,
) -> Result<Vec<FrameTotal>, FormatError> {
    if rows.is_empty() {
        warn!("Got an empty recordset, nothing to aggregate");
        return Ok(Vec::new());
    }

    debug!("Aggregating {} trace rows", rows.len());

    let mut table: HashMap<String, f64> = HashMap::new();

    for row in rows {
        // The agent also records `cpu.trace.<n> = <n>` rows; they hold no stack.
        if is_self_counter(&row.name, strip_prefix) {
            debug!("Skipping counter row {}", row.name);
            continue;
        }

        let frame = format_frame_name(&row.name, strip_prefix)?;
        *table.entry(frame).or_insert(0.0) += row.total();
    }

    let mut totals: Vec<FrameTotal> = table
        .into_iter()
        .map(|(frame, total)| FrameTotal::new(frame, total))
        .collect();

    totals.sort_by(|a, b| a.frame.cmp(&b.frame));

    let merged = totals.len();
    totals.retain(|entry| !filters.excludes(&entry.frame) && !is_own_total(entry));

    debug!(
        "Aggregated {} unique frames, {} after filtering",
        merged,
        totals.len()
    );

    Ok(totals)
}

/// Frame names that read as a number equal to their own total
///
/// **Private** - guard against counter rows that survive formatting.
/// Kept as found in the data; its purpose has not been confirmed.
fn is_own_total(entry: &FrameTotal) -> bool {
    entry
        .frame
        .parse::<f64>()
        .map_or(false, |value| value == entry.total)
}
