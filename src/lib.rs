//! Influx Trace Dump
//!
//! Export JVM CPU trace profiles stored in InfluxDB as collapsed-stack
//! text files, one per profiled process, ready for flamegraph renderers.
//!
//! ## Getting Started
//!
//! ```bash
//! influx-trace-dump export -o localhost -u admin -p secret -d profiler -e statsd.app
//! ```
//!
//! The pipeline is available as a library too: implement
//! [`influx::TraceSource`] and drive [`commands::run_export`].

pub mod aggregator;
pub mod commands;
pub mod influx;
pub mod output;
pub mod utils;
