//! List command: show which instances have profiler data.

use super::models::ConnectionArgs;
use crate::influx::{InfluxClient, TraceSource};
use crate::utils::config::HOST_TAG;
use anyhow::{Context, Result};

/// Print instance identifiers and hosts found under the sizing metric
pub fn execute_list(connection: &ConnectionArgs, size_metric: &str, instance_tag: &str) -> Result<()> {
    let client = InfluxClient::new(connection.to_config()?).context("Failed to create InfluxDB client")?;

    let instances = client
        .tag_values(size_metric, instance_tag)
        .with_context(|| format!("Failed to list {} values", instance_tag))?;
    let hosts = client
        .tag_values(size_metric, HOST_TAG)
        .context("Failed to list hosts")?;

    println!("Instances ({}):", instances.len());
    for instance in &instances {
        println!("  {}", instance);
    }

    println!("Hosts ({}):", hosts.len());
    for host in &hosts {
        println!("  {}", host);
    }

    Ok(())
}
