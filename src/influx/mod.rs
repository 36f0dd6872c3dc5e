//! InfluxDB access for profiler trace data.
//!
//! Everything that knows about InfluxQL or the HTTP response layout lives
//! here; the rest of the crate sees typed rows through [`TraceSource`].

pub mod client;
pub mod query;
pub mod source;
pub mod types;

pub use client::{InfluxClient, InfluxConfig};
pub use query::TagSelector;
pub use source::TraceSource;
pub use types::{QueryResponse, RawSeriesRow, Series};
