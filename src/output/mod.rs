//! Output writers for exported trace profiles.
//!
//! This module handles writing data to disk in two formats:
//! - Collapsed-stack text files (one per instance)
//! - Optional SVG flamegraphs rendered from the same lines

pub mod collapsed;
pub mod svg;

// Re-export main functions
pub use collapsed::{validate_path, write_frames, write_lines};
pub use svg::write_svg;
