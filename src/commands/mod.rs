//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod export;
pub mod list;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use export::{execute_export, prepare, run_export};
pub use list::execute_list;
pub use models::{
    ConnectionArgs, ExportArgs, ExportPlan, ExportReport, InstanceDescriptor, InstanceOutcome,
};
pub use utils::display_version;
