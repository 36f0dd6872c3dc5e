//! The narrow query interface the export pipeline depends on.

use super::query::TagSelector;
use super::types::RawSeriesRow;
use crate::utils::error::QueryError;

/// Source of profiler trace data
///
/// Implemented over HTTP by [`InfluxClient`](super::InfluxClient); tests
/// use in-memory implementations.
pub trait TraceSource {
    /// Distinct values of `tag` across the series of `measurement`
    fn tag_values(&self, measurement: &str, tag: &str) -> Result<Vec<String>, QueryError>;

    /// Timestamp of the first sample of `measurement` under `selector`
    ///
    /// `Ok(None)` when the selector matches no samples.
    fn first_sample_time(
        &self,
        measurement: &str,
        selector: &TagSelector,
    ) -> Result<Option<String>, QueryError>;

    /// All series whose name starts with `prefix`, under `selector`
    fn trace_rows(
        &self,
        prefix: &str,
        selector: &TagSelector,
    ) -> Result<Vec<RawSeriesRow>, QueryError>;
}
