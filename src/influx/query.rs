//! InfluxQL statement builders and tag selectors.

use crate::utils::config::{DEFAULT_PREFIX_TAG, TAG_MAPPING_SKIP};
use crate::utils::error::ConfigError;
use std::collections::BTreeMap;

/// Tag name to tag value filter scoping a query to one instance
///
/// Backed by a `BTreeMap` so generated clauses are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelector {
    tags: BTreeMap<String, String>,
}

impl TagSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the base selector from a metric prefix and optional tag mapping
    ///
    /// **Public** - called once during configuration
    ///
    /// # Arguments
    /// * `prefix` - Metric prefix, e.g. `statsd.app.web01`
    /// * `mapping` - Dot-separated tag names zipped against the prefix
    ///   components, e.g. `SKIP.service.host`
    ///
    /// Without a mapping the whole prefix is matched against the `prefix` tag.
    ///
    /// # Errors
    /// * `ConfigError::InvalidTagMapping` - component counts differ
    pub fn from_mapping(prefix: &str, mapping: Option<&str>) -> Result<Self, ConfigError> {
        let Some(mapping) = mapping else {
            return Ok(Self::new().with_tag(DEFAULT_PREFIX_TAG, prefix));
        };

        let tag_names: Vec<&str> = mapping.split('.').collect();
        let components: Vec<&str> = prefix.split('.').collect();

        if tag_names.len() != components.len() {
            return Err(ConfigError::InvalidTagMapping {
                mapping: mapping.to_string(),
                tags: tag_names.len(),
                components: components.len(),
            });
        }

        Ok(tag_names
            .into_iter()
            .zip(components)
            .filter(|(tag, _)| *tag != TAG_MAPPING_SKIP)
            .fold(Self::new(), |selector, (tag, value)| selector.with_tag(tag, value)))
    }

    /// Add or replace one tag
    pub fn with_tag(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(tag.into(), value.into());
        self
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Render as a `WHERE` condition, or `None` for an empty selector
    pub fn to_condition(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }

        let clauses: Vec<String> = self
            .tags
            .iter()
            .map(|(tag, value)| format!("{} = {}", quote_ident(tag), quote_literal(value)))
            .collect();

        Some(clauses.join(" AND "))
    }
}

/// `SHOW TAG VALUES FROM "<measurement>" WITH KEY = "<tag>"`
pub fn show_tag_values(measurement: &str, tag: &str) -> String {
    format!(
        "SHOW TAG VALUES FROM {} WITH KEY = {}",
        quote_ident(measurement),
        quote_ident(tag)
    )
}

/// First `value` sample of a measurement under a selector
pub fn first_sample(measurement: &str, selector: &TagSelector) -> String {
    format!(
        "SELECT value FROM {}{} LIMIT 1",
        quote_ident(measurement),
        where_clause(selector)
    )
}

/// Every series whose name starts with `prefix`, under a selector
pub fn trace_series(prefix: &str, selector: &TagSelector) -> String {
    format!(
        "SELECT value FROM {}{}",
        series_pattern(prefix),
        where_clause(selector)
    )
}

/// Regex measurement pattern matching names that start with `prefix`
pub fn series_pattern(prefix: &str) -> String {
    let escaped = regex::escape(prefix).replace('/', "\\/");
    format!("/^{}.*/", escaped)
}

fn where_clause(selector: &TagSelector) -> String {
    selector
        .to_condition()
        .map(|condition| format!(" WHERE {}", condition))
        .unwrap_or_default()
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('\\', "\\\\").replace('"', "\\\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_literal_escapes() {
        assert_eq!(quote_literal("it's"), r"'it\'s'");
        assert_eq!(quote_literal(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn test_quote_ident_escapes() {
        assert_eq!(quote_ident("cpu.stats.size"), "\"cpu.stats.size\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\\\"ird\"");
    }

    #[test]
    fn test_empty_selector_has_no_where() {
        assert_eq!(where_clause(&TagSelector::new()), "");
    }
}
