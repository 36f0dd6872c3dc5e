//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::utils::config::{CONFIG_ERROR_EXIT_CODE, FATAL_ERROR_EXIT_CODE};
use std::path::PathBuf;
use thiserror::Error;

/// Errors in command line configuration, raised before any query is sent
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required option: --{0}")]
    MissingOption(&'static str),

    #[error("Invalid tag mapping {mapping}: {tags} tag names for {components} prefix components")]
    InvalidTagMapping {
        mapping: String,
        tags: usize,
        components: usize,
    },

    #[error("Cannot read filter file {}: {source}", .path.display())]
    FilterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while talking to InfluxDB
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid InfluxDB response: {0}")]
    InvalidResponse(String),

    #[error("InfluxDB rejected query: {0}")]
    Server(String),
}

/// Expected data that is absent for one instance
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("No start timestamp sample for instance {0}")]
    NoSample(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Metric names that do not follow the `<frame>-<line>` convention
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("Trace token {token:?} in metric {name:?} has no line number separator")]
    MissingLineNumber { name: String, token: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to render flamegraph: {0}")]
    RenderFailed(String),
}

/// Process exit status for a fatal error
///
/// Configuration errors keep their own status even when wrapped in context.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ConfigError>().is_some() {
        CONFIG_ERROR_EXIT_CODE
    } else {
        FATAL_ERROR_EXIT_CODE
    }
}
