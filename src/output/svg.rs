//! SVG flamegraph rendering of exported frames.
//!
//! Rendering is delegated to inferno; this module only feeds it the same
//! lines that go into the text export.

use super::collapsed::{create_parent_dirs, validate_path};
use crate::aggregator::FrameTotal;
use crate::utils::error::OutputError;
use inferno::flamegraph::{self, Options};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render frame totals as an SVG flamegraph
///
/// **Public** - optional companion to the text export
///
/// # Errors
/// * `OutputError::RenderFailed` - no frames, or inferno rejected the input
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_svg(
    frames: &[FrameTotal],
    title: &str,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    if frames.is_empty() {
        return Err(OutputError::RenderFailed("no frames to render".to_string()));
    }

    info!("Writing SVG to: {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let lines: Vec<String> = frames.iter().map(|f| f.to_string()).collect();

    let mut options = Options::default();
    options.title = title.to_string();
    options.count_name = "samples".to_string();

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut writer)
        .map_err(|e| OutputError::RenderFailed(e.to_string()))?;

    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}
