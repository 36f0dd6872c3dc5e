//! Collapsed-stack text output writer.
//!
//! One line per frame: `<frame> <count>\n`, no header or summary.

use crate::aggregator::FrameTotal;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write frame totals to a collapsed-stack file
///
/// **Public** - main entry point for export output
///
/// An empty `frames` slice produces an empty file.
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
pub fn write_frames(frames: &[FrameTotal], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Making file {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    write_lines(frames, &mut writer)?;

    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Output finished ({} frames)", frames.len());

    Ok(())
}

/// Write frame lines to any writer
///
/// **Public** - shared by file output and flamegraph rendering
pub fn write_lines<W: Write>(frames: &[FrameTotal], writer: &mut W) -> Result<(), OutputError> {
    for frame in frames {
        writeln!(writer, "{}", frame).map_err(OutputError::WriteFailed)?;
    }
    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - also used before rendering SVG files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories if needed
pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_lines_format() {
        let frames = vec![
            FrameTotal::new("a:0001", 3.0),
            FrameTotal::new("b:0002;a:0001", 10.75),
        ];
        let mut buffer = Vec::new();
        write_lines(&frames, &mut buffer).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "a:0001 3\nb:0002;a:0001 10\n");
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }
}
