//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for InfluxDB HTTP requests
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Default port of the InfluxDB HTTP API
pub const DEFAULT_INFLUX_PORT: u16 = 8086;

/// Exit status for missing or invalid configuration
pub const CONFIG_ERROR_EXIT_CODE: i32 = 255;

/// Exit status for every other fatal error
pub const FATAL_ERROR_EXIT_CODE: i32 = 1;

// Metric naming convention used by the JVM profiler agent
pub const DEFAULT_TRACE_PREFIX: &str = "cpu.trace.";
pub const DEFAULT_SIZE_METRIC: &str = "cpu.stats.size";
pub const DEFAULT_INSTANCE_TAG: &str = "jvmName";

/// Tag holding the host name of a profiled process
pub const HOST_TAG: &str = "host";

/// Tag used for the whole metric prefix when no tag mapping is given
pub const DEFAULT_PREFIX_TAG: &str = "prefix";

/// Tag mapping component meaning "no tag for this position"
pub const TAG_MAPPING_SKIP: &str = "SKIP";

/// Host used when an instance identifier has no `@host` suffix
pub const UNKNOWN_HOST: &str = "unknown";

/// Width line numbers are zero-padded to inside frame names
pub const LINE_NUMBER_WIDTH: usize = 4;

/// Extension of exported collapsed-stack files
pub const OUTPUT_EXTENSION: &str = ".txt";
