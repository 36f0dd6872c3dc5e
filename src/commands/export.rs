//! Export command implementation.
//!
//! The export command:
//! 1. Validates configuration (before any network activity)
//! 2. Discovers instance identifiers from the sizing metric
//! 3. Per instance: resolves the start timestamp, fetches trace rows,
//!    aggregates them and writes one collapsed-stack file
//!
//! An instance whose start timestamp cannot be resolved is skipped; every
//! other failure aborts the run.

use super::models::{ExportArgs, ExportPlan, ExportReport, InstanceDescriptor, InstanceOutcome};
use crate::aggregator::{aggregate, ExclusionFilterSet, FrameTotal};
use crate::influx::{InfluxClient, InfluxConfig, TagSelector, TraceSource};
use crate::output::{write_frames, write_svg};
use crate::utils::error::{ConfigError, LookupError};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the export command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * `ConfigError` - missing options, bad tag mapping, unreadable filter file
/// * InfluxDB failures other than the per-instance timestamp lookup
/// * Malformed trace metric names
/// * File write errors
pub fn execute_export(args: ExportArgs) -> Result<ExportReport> {
    let start_time = Instant::now();

    let (influx, plan) = prepare(&args)?;

    info!("Exporting traces from {}:{} / {}", influx.host, influx.port, influx.database);

    let client = InfluxClient::new(influx).context("Failed to create InfluxDB client")?;

    let instances = client
        .tag_values(&plan.size_metric, &plan.instance_tag)
        .with_context(|| format!("Failed to list {} values", plan.instance_tag))?;

    info!("Found {} instances", instances.len());

    let report = run_export(&client, &plan, &instances)?;

    info!("Export completed in {:.2}s: {}", start_time.elapsed().as_secs_f64(), report);

    Ok(report)
}

/// Validate arguments and build the run plan
///
/// **Public** - can be called before execute_export for early validation
///
/// # Errors
/// * `ConfigError::MissingOption` - host, username, password, database or prefix absent
/// * `ConfigError::InvalidTagMapping` - mapping does not match the prefix
/// * `ConfigError::FilterFile` - filter file unreadable
pub fn prepare(args: &ExportArgs) -> Result<(InfluxConfig, ExportPlan), ConfigError> {
    let influx = args.connection.to_config()?;

    let prefix = args
        .prefix
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(ConfigError::MissingOption("prefix"))?;

    let base_tags = TagSelector::from_mapping(prefix, args.tag_mapping.as_deref())?;

    let filters = match &args.filter {
        Some(path) => ExclusionFilterSet::load(path)?,
        None => ExclusionFilterSet::default(),
    };

    debug!("Base tags: {:?}, {} exclusion filters", base_tags, filters.len());

    let plan = ExportPlan {
        base_tags,
        filters,
        file_prefix: args.file_prefix.clone(),
        trace_prefix: args.trace_prefix.clone(),
        size_metric: args.size_metric.clone(),
        instance_tag: args.instance_tag.clone(),
        svg: args.svg,
    };

    Ok((influx, plan))
}

/// Export every instance, in order, against any trace source
///
/// **Public** - the orchestration loop, independent of InfluxDB
pub fn run_export<S: TraceSource + ?Sized>(
    source: &S,
    plan: &ExportPlan,
    instances: &[String],
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    for identifier in instances {
        info!("======== {} ========", identifier);
        let outcome = export_instance(source, plan, identifier)?;
        report.push(identifier.as_str(), outcome);
    }

    Ok(report)
}

/// Process one instance through lookup, fetch, aggregate and write
///
/// **Private** - internal helper for run_export
fn export_instance<S: TraceSource + ?Sized>(
    source: &S,
    plan: &ExportPlan,
    identifier: &str,
) -> Result<InstanceOutcome> {
    let selector = plan.selector_for(identifier);

    let start = match resolve_start_time(source, plan, &selector, identifier) {
        Ok(start) => start,
        Err(e) => {
            warn!("Skipping instance {}: {}", identifier, e);
            return Ok(InstanceOutcome::Skipped {
                reason: e.to_string(),
            });
        }
    };
    debug!("{}: start timestamp resolved to {}", identifier, start);

    let instance = InstanceDescriptor::new(identifier, start);
    let path = PathBuf::from(instance.file_name(&plan.file_prefix));

    let rows = source
        .trace_rows(&plan.trace_prefix, &selector)
        .with_context(|| format!("Failed to fetch trace rows for instance {}", identifier))?;
    debug!("{}: fetched {} trace rows", identifier, rows.len());

    let frames = aggregate(&rows, &plan.trace_prefix, &plan.filters)
        .with_context(|| format!("Failed to aggregate traces for instance {}", identifier))?;
    debug!("{}: aggregated {} frames", identifier, frames.len());

    write_frames(&frames, &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if plan.svg {
        render_svg(&frames, identifier, &path);
    }

    Ok(InstanceOutcome::Written {
        path,
        frames: frames.len(),
    })
}

/// Render the optional flamegraph next to an export
///
/// **Private** - a failed render never fails the instance; the text
/// export is already on disk
fn render_svg(frames: &[FrameTotal], identifier: &str, path: &Path) {
    if frames.iter().all(|f| f.count() <= 0) {
        warn!("No positive sample counts for {}, skipping flamegraph", identifier);
        return;
    }

    let svg_path = path.with_extension("svg");
    if let Err(e) = write_svg(frames, identifier, &svg_path) {
        warn!("Failed to write {}: {}", svg_path.display(), e);
    }
}

/// Look up when measurements for an instance started
///
/// **Private** - both query failures and missing samples are recoverable
fn resolve_start_time<S: TraceSource + ?Sized>(
    source: &S,
    plan: &ExportPlan,
    selector: &TagSelector,
    identifier: &str,
) -> Result<String, LookupError> {
    source
        .first_sample_time(&plan.size_metric, selector)?
        .ok_or_else(|| LookupError::NoSample(identifier.to_string()))
}
