//! Types for the InfluxDB 1.x `/query` HTTP API.
//!
//! The server answers every statement with the same envelope; this module
//! turns it into typed rows so nothing downstream touches raw JSON.

use crate::utils::error::QueryError;
use serde::Deserialize;
use serde_json::Value;

/// Top-level `/query` response
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<StatementResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of one InfluxQL statement
#[derive(Debug, Deserialize)]
pub struct StatementResult {
    #[serde(default)]
    pub statement_id: u64,
    /// Absent when the statement matched nothing
    #[serde(default)]
    pub series: Option<Vec<Series>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One series in a statement result
#[derive(Debug, Clone, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// One trace series with its `(timestamp, sample)` pairs
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeriesRow {
    /// Raw metric key, e.g. `cpu.trace.Main-run-10.Main-main-3`
    pub name: String,
    pub values: Vec<(String, f64)>,
}

impl RawSeriesRow {
    pub fn new(name: impl Into<String>, values: Vec<(String, f64)>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Sum of every sample in the row
    pub fn total(&self) -> f64 {
        self.values.iter().map(|(_, sample)| sample).sum()
    }
}

impl QueryResponse {
    /// Series of the first statement, checking both error fields
    ///
    /// **Public** - a missing `series` key yields an empty vector
    ///
    /// # Errors
    /// * `QueryError::Server` - the server reported an error
    /// * `QueryError::InvalidResponse` - no statement result present
    pub fn into_series(self) -> Result<Vec<Series>, QueryError> {
        if let Some(error) = self.error {
            return Err(QueryError::Server(error));
        }

        let statement = self.results.into_iter().next().ok_or_else(|| {
            QueryError::InvalidResponse("Missing results field".to_string())
        })?;

        if let Some(error) = statement.error {
            return Err(QueryError::Server(error));
        }

        Ok(statement.series.unwrap_or_default())
    }
}

impl Series {
    /// Convert a `SELECT value` series into a trace row
    ///
    /// `null` samples are ignored; any other non-numeric sample is rejected.
    pub fn into_trace_row(self) -> Result<RawSeriesRow, QueryError> {
        let time_idx = self.column_index("time").unwrap_or(0);
        let value_idx = self.column_index("value").unwrap_or(1);

        let mut values = Vec::with_capacity(self.values.len());
        for point in &self.values {
            let sample = match point.get(value_idx) {
                None | Some(Value::Null) => continue,
                Some(sample) => sample.as_f64().ok_or_else(|| {
                    QueryError::InvalidResponse(format!(
                        "Non-numeric sample {} in series {}",
                        sample, self.name
                    ))
                })?,
            };
            let timestamp = point.get(time_idx).map(value_to_string).unwrap_or_default();
            values.push((timestamp, sample));
        }

        Ok(RawSeriesRow {
            name: self.name,
            values,
        })
    }

    /// Timestamp of the first point, if any
    pub fn first_time(&self) -> Option<String> {
        let time_idx = self.column_index("time").unwrap_or(0);
        self.values
            .first()
            .and_then(|point| point.get(time_idx))
            .filter(|v| !v.is_null())
            .map(value_to_string)
    }

    /// Values of a `SHOW TAG VALUES` result
    pub fn tag_values(&self) -> Vec<String> {
        let value_idx = self
            .column_index("value")
            .unwrap_or_else(|| self.columns.len().saturating_sub(1));

        self.values
            .iter()
            .filter_map(|row| row.get(value_idx))
            .map(value_to_string)
            .collect()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Render a JSON scalar without quotes
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
