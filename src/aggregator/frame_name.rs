//! Convert dotted trace metric keys into collapsed-stack frame names.
//!
//! The profiler agent writes one metric per sampled stack:
//! `cpu.trace.<innermost>-<line>.<caller>-<line>...`, where each frame is
//! `<class-with-dashes>-<method>-<line>`.
//!
//! Renderers expect the outermost frame first, separated by `;`:
//! `<caller>:0042;<innermost>:0007`

use crate::utils::config::LINE_NUMBER_WIDTH;
use crate::utils::error::FormatError;

/// Format a raw trace metric key as a stack-frame string
///
/// **Public** - aggregation key for trace rows
///
/// # Arguments
/// * `raw_name` - Metric key as stored in InfluxDB
/// * `strip_prefix` - Literal prefix removed from the start of the key
///
/// # Errors
/// * `FormatError::MissingLineNumber` - a token has no `-` separator
///
/// # Example
/// ```ignore
/// let frame = format_frame_name("p.a-1.b-23", "p.")?;
/// assert_eq!(frame, "b:0023;a:0001");
/// ```
pub fn format_frame_name(raw_name: &str, strip_prefix: &str) -> Result<String, FormatError> {
    let remainder = raw_name.strip_prefix(strip_prefix).unwrap_or(raw_name);

    let frames = remainder
        .split('.')
        .rev()
        .map(|token| format_token(raw_name, token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(frames.join(";").replace('-', "."))
}

/// Split one token on its last `-` and pad the line number
///
/// **Private** - internal helper for format_frame_name
fn format_token(raw_name: &str, token: &str) -> Result<String, FormatError> {
    let (frame, line) = token
        .rsplit_once('-')
        .ok_or_else(|| FormatError::MissingLineNumber {
            name: raw_name.to_string(),
            token: token.to_string(),
        })?;

    Ok(format!("{}:{:0>width$}", frame, line, width = LINE_NUMBER_WIDTH))
}

/// Check whether a row is one of the agent's `<prefix><digits>` counters
///
/// **Public** - these rows carry no stack and are skipped before formatting
pub fn is_self_counter(raw_name: &str, strip_prefix: &str) -> bool {
    match raw_name.strip_prefix(strip_prefix) {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_token_pads_line_number() {
        assert_eq!(format_token("x", "run-7").unwrap(), "run:0007");
        assert_eq!(format_token("x", "run-12345").unwrap(), "run:12345");
    }

    #[test]
    fn test_format_token_without_separator() {
        let err = format_token("cpu.trace.main", "main").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingLineNumber {
                name: "cpu.trace.main".to_string(),
                token: "main".to_string(),
            }
        );
    }

    #[test]
    fn test_is_self_counter() {
        assert!(is_self_counter("cpu.trace.23", "cpu.trace."));
        assert!(!is_self_counter("cpu.trace.", "cpu.trace."));
        assert!(!is_self_counter("cpu.trace.23a", "cpu.trace."));
        assert!(!is_self_counter("other.23", "cpu.trace."));
    }
}
