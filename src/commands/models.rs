use crate::aggregator::ExclusionFilterSet;
use crate::influx::{InfluxConfig, TagSelector};
use crate::utils::config::{
    DEFAULT_INFLUX_PORT, DEFAULT_INSTANCE_TAG, DEFAULT_SIZE_METRIC, DEFAULT_TRACE_PREFIX,
    OUTPUT_EXTENSION, UNKNOWN_HOST,
};
use crate::utils::error::ConfigError;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

/// InfluxDB connection options shared by all commands
///
/// **Public** - required values stay optional until validated
#[derive(Debug, Clone)]
pub struct ConnectionArgs {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl Default for ConnectionArgs {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_INFLUX_PORT,
            username: None,
            password: None,
            database: None,
        }
    }
}

impl ConnectionArgs {
    /// Check required options and build the client configuration
    ///
    /// # Errors
    /// * `ConfigError::MissingOption` - first missing option, in flag order
    pub fn to_config(&self) -> Result<InfluxConfig, ConfigError> {
        Ok(InfluxConfig {
            host: required(&self.host, "host")?,
            port: self.port,
            username: required(&self.username, "username")?,
            password: required(&self.password, "password")?,
            database: required(&self.database, "database")?,
        })
    }
}

fn required(value: &Option<String>, option: &'static str) -> Result<String, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingOption(option))
}

/// Arguments for the export command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub connection: ConnectionArgs,

    /// Metric prefix the profiler agent was configured with
    pub prefix: Option<String>,

    /// Dot-separated tag names matching the prefix components
    pub tag_mapping: Option<String>,

    /// Newline-delimited list of substrings to exclude
    pub filter: Option<PathBuf>,

    /// Prepended to every output file name (may contain directories)
    pub file_prefix: String,

    pub trace_prefix: String,
    pub size_metric: String,
    pub instance_tag: String,

    /// Also render an SVG flamegraph per instance
    pub svg: bool,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            connection: ConnectionArgs::default(),
            prefix: None,
            tag_mapping: None,
            filter: None,
            file_prefix: String::new(),
            trace_prefix: DEFAULT_TRACE_PREFIX.to_string(),
            size_metric: DEFAULT_SIZE_METRIC.to_string(),
            instance_tag: DEFAULT_INSTANCE_TAG.to_string(),
            svg: false,
        }
    }
}

/// Validated, immutable inputs of one export run
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub base_tags: TagSelector,
    pub filters: ExclusionFilterSet,
    pub file_prefix: String,
    pub trace_prefix: String,
    pub size_metric: String,
    pub instance_tag: String,
    pub svg: bool,
}

impl ExportPlan {
    /// Selector scoping queries to one instance
    pub fn selector_for(&self, identifier: &str) -> TagSelector {
        self.base_tags
            .clone()
            .with_tag(self.instance_tag.as_str(), identifier)
    }
}

/// Split an instance identifier into `(pid, host)` on the first `@`
pub fn split_identifier(identifier: &str) -> (String, String) {
    match identifier.split_once('@') {
        Some((pid, host)) => (pid.to_string(), host.to_string()),
        None => (identifier.to_string(), UNKNOWN_HOST.to_string()),
    }
}

/// One profiled process with its measurement start time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    pub pid: String,
    pub host: String,
    pub start_time: String,
}

impl InstanceDescriptor {
    pub fn new(identifier: &str, start_time: impl Into<String>) -> Self {
        let (pid, host) = split_identifier(identifier);
        Self {
            pid,
            host,
            start_time: start_time.into(),
        }
    }

    /// `<prefix><timestamp>_<host>_<pid>.txt` with unsafe characters replaced
    pub fn file_name(&self, file_prefix: &str) -> String {
        format!(
            "{}{}_{}_{}{}",
            file_prefix,
            non_digits().replace_all(&self.start_time, "_"),
            non_filename().replace_all(&self.host, "_"),
            non_filename().replace_all(&self.pid, "_"),
            OUTPUT_EXTENSION
        )
    }
}

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]+").expect("valid regex"))
}

fn non_filename() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.\-]+").expect("valid regex"))
}

/// Terminal state of one instance
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceOutcome {
    /// Output file written (possibly empty)
    Written { path: PathBuf, frames: usize },

    /// Start timestamp could not be resolved
    Skipped { reason: String },
}

/// Per-instance outcomes in processing order
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub instances: Vec<(String, InstanceOutcome)>,
}

impl ExportReport {
    pub fn push(&mut self, identifier: impl Into<String>, outcome: InstanceOutcome) {
        self.instances.push((identifier.into(), outcome));
    }

    pub fn written(&self) -> usize {
        self.instances
            .iter()
            .filter(|(_, o)| matches!(o, InstanceOutcome::Written { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.instances.len() - self.written()
    }

    /// Outcome for one identifier
    pub fn outcome(&self, identifier: &str) -> Option<&InstanceOutcome> {
        self.instances
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, outcome)| outcome)
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} instances: {} written, {} skipped",
            self.instances.len(),
            self.written(),
            self.skipped()
        )
    }
}
