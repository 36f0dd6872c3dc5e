//! Influx Trace Dump CLI
//!
//! Exports flame-graph CPU traces recorded by the JVM profiler agent
//! from InfluxDB into one collapsed-stack file per process.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::error;
use std::path::PathBuf;

use influx_trace_dump::commands::{
    display_version, execute_export, execute_list, ConnectionArgs, ExportArgs,
};
use influx_trace_dump::utils::config::{
    DEFAULT_INFLUX_PORT, DEFAULT_INSTANCE_TAG, DEFAULT_SIZE_METRIC, DEFAULT_TRACE_PREFIX,
};
use influx_trace_dump::utils::exit_code;

/// Influx Trace Dump - export JVM CPU traces for flamegraphs
#[derive(Parser, Debug)]
#[command(name = "influx-trace-dump")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// InfluxDB connection options
#[derive(Args, Debug)]
struct Connection {
    /// Hostname of InfluxDB server
    #[arg(short = 'o', long)]
    host: Option<String>,

    /// Port for InfluxDB HTTP API
    #[arg(short = 'r', long, default_value_t = DEFAULT_INFLUX_PORT)]
    port: u16,

    /// Username with which to connect to InfluxDB
    #[arg(short, long)]
    username: Option<String>,

    /// Password with which to connect to InfluxDB
    #[arg(short, long, env = "INFLUX_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// InfluxDB database which contains profiler data
    #[arg(short, long)]
    database: Option<String>,
}

impl From<Connection> for ConnectionArgs {
    fn from(c: Connection) -> Self {
        Self {
            host: c.host,
            port: c.port,
            username: c.username,
            password: c.password,
            database: c.database,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Export one collapsed-stack file per profiled JVM
    Export {
        #[command(flatten)]
        connection: Connection,

        /// Metric prefix
        #[arg(short = 'e', long)]
        prefix: Option<String>,

        /// Tag mapping for metric prefix (e.g. SKIP.service.host)
        #[arg(short = 't', long)]
        tag_mapping: Option<String>,

        /// File listing strings which won't go into the output, one per line
        #[arg(short = 'f', long)]
        filter: Option<PathBuf>,

        /// Prefix for output file names
        #[arg(short = 'x', long, default_value = "")]
        file_prefix: String,

        /// Prefix of trace metric names
        #[arg(long, default_value = DEFAULT_TRACE_PREFIX)]
        trace_prefix: String,

        /// Metric used to discover instances and their start time
        #[arg(long, default_value = DEFAULT_SIZE_METRIC)]
        size_metric: String,

        /// Tag identifying one profiled process
        #[arg(long, default_value = DEFAULT_INSTANCE_TAG)]
        instance_tag: String,

        /// Also render an SVG flamegraph next to each export
        #[arg(long)]
        svg: bool,
    },

    /// List profiled instances and hosts
    List {
        #[command(flatten)]
        connection: Connection,

        /// Metric used to discover instances
        #[arg(long, default_value = DEFAULT_SIZE_METRIC)]
        size_metric: String,

        /// Tag identifying one profiled process
        #[arg(long, default_value = DEFAULT_INSTANCE_TAG)]
        instance_tag: String,
    },

    /// Display version information
    Version,
}

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Dispatch one subcommand
///
/// **Private** - errors are logged and mapped to an exit status by main
fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Export {
            connection,
            prefix,
            tag_mapping,
            filter,
            file_prefix,
            trace_prefix,
            size_metric,
            instance_tag,
            svg,
        } => {
            let args = ExportArgs {
                connection: connection.into(),
                prefix,
                tag_mapping,
                filter,
                file_prefix,
                trace_prefix,
                size_metric,
                instance_tag,
                svg,
            };

            execute_export(args)?;
        }

        Commands::List {
            connection,
            size_metric,
            instance_tag,
        } => {
            let connection: ConnectionArgs = connection.into();
            execute_list(&connection, &size_metric, &instance_tag)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
