//! Substring filters for frames that should not be exported.

use crate::utils::error::ConfigError;
use log::debug;
use std::collections::BTreeSet;
use std::path::Path;

/// Immutable set of exclusion substrings
///
/// A frame is excluded when any entry occurs anywhere inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionFilterSet {
    patterns: BTreeSet<String>,
}

impl ExclusionFilterSet {
    /// Build a filter set from in-memory patterns
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a newline-delimited filter list
    ///
    /// Trailing whitespace is trimmed and blank lines are ignored.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Load a filter list from disk
    ///
    /// **Public** - called once at startup
    ///
    /// # Errors
    /// * `ConfigError::FilterFile` - file missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FilterFile {
            path: path.to_path_buf(),
            source,
        })?;

        let filters = Self::parse(&content);
        debug!("Loaded {} exclusion filters from {}", filters.len(), path.display());

        Ok(filters)
    }

    pub fn excludes(&self, frame_name: &str) -> bool {
        self.patterns.iter().any(|p| frame_name.contains(p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
