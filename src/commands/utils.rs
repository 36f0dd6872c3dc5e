use crate::utils::config::{DEFAULT_SIZE_METRIC, DEFAULT_TRACE_PREFIX};

/// Display version information
pub fn display_version() {
    println!("Influx Trace Dump v{}", env!("CARGO_PKG_VERSION"));
    println!("Trace metrics: {}*", DEFAULT_TRACE_PREFIX);
    println!("Sizing metric: {}", DEFAULT_SIZE_METRIC);
    println!();
    println!("Exports JVM CPU trace profiles from InfluxDB as collapsed stacks.");
}
