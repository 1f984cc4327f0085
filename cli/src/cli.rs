//! CLI parse: clap types for zaia

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};

use crate::errors::{CliError, ErrorCode};

/// zaia - drive a Zerops project from scripts and agents; every command prints one JSON object
#[derive(Parser, Debug)]
#[command(name = "zaia", version)]
pub struct Cli {
    /// Write debug logs to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with a project-scoped token
    Login {
        /// Access token
        token: String,

        /// API host (defaults to ZAIA_API_HOST or the primary region)
        #[arg(long)]
        url: Option<String>,

        /// Region name recorded with the credentials
        #[arg(long)]
        region: Option<String>,
    },
    /// Remove stored credentials
    Logout,
    /// Show the stored identity
    Status,
    /// Show build information
    Version,
    /// Discover the project and its services
    Discover {
        /// Show details for one service
        #[arg(long)]
        service: Option<String>,

        /// Include service environment variables
        #[arg(long)]
        include_envs: bool,
    },
    /// Start a service
    Start(ServiceArgs),
    /// Stop a service
    Stop(ServiceArgs),
    /// Restart a service
    Restart(ServiceArgs),
    /// Change autoscaling limits of a service
    Scale(ScaleArgs),
    /// Manage environment variables
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },
    /// Import services from YAML
    Import(ImportArgs),
    /// Delete a service
    Delete {
        #[arg(long)]
        service: Option<String>,

        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },
    /// Show a process
    Process {
        process_id: String,
    },
    /// Cancel a running process
    Cancel {
        process_id: String,
    },
    /// Toggle subdomain access of a service
    Subdomain {
        #[command(subcommand)]
        command: SubdomainCommands,
    },
    /// Fetch runtime logs of a service
    Logs(LogsArgs),
    /// Show the project activity timeline
    Events {
        /// Only events of this service hostname
        #[arg(long)]
        service: Option<String>,

        /// Maximum number of events
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Service hostname
    #[arg(long)]
    pub service: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScaleArgs {
    /// Service hostname
    #[arg(long)]
    pub service: Option<String>,

    /// SHARED or DEDICATED
    #[arg(long)]
    pub cpu_mode: Option<String>,

    #[arg(long)]
    pub min_cpu: Option<u32>,

    #[arg(long)]
    pub max_cpu: Option<u32>,

    /// GB
    #[arg(long)]
    pub min_ram: Option<f64>,

    /// GB
    #[arg(long)]
    pub max_ram: Option<f64>,

    /// GB
    #[arg(long)]
    pub min_disk: Option<f64>,

    /// GB
    #[arg(long)]
    pub max_disk: Option<f64>,

    /// Minimum container count
    #[arg(long)]
    pub min_replicas: Option<u32>,

    /// Maximum container count
    #[arg(long)]
    pub max_replicas: Option<u32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EnvScope {
    /// Service hostname
    #[arg(long, conflicts_with = "project")]
    pub service: Option<String>,

    /// Use project-level variables
    #[arg(long)]
    pub project: bool,
}

#[derive(Subcommand, Debug)]
pub enum EnvCommands {
    /// List variables
    Get(EnvScope),
    /// Set variables given as KEY=value
    Set {
        #[command(flatten)]
        scope: EnvScope,

        /// Mark project variables as sensitive
        #[arg(long)]
        sensitive: bool,

        /// KEY=value pairs
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// Delete variables by key
    Delete {
        #[command(flatten)]
        scope: EnvScope,

        /// Keys to delete
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ImportArgs {
    /// YAML file to import
    #[arg(long, conflicts_with = "content")]
    pub file: Option<PathBuf>,

    /// Inline YAML
    #[arg(long)]
    pub content: Option<String>,

    /// Validate and preview without importing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubdomainCommands {
    /// Enable subdomain access
    Enable(ServiceArgs),
    /// Disable subdomain access
    Disable(ServiceArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LogsArgs {
    /// Service hostname
    #[arg(long)]
    pub service: Option<String>,

    /// all, error, warning, info, or debug
    #[arg(long, default_value = "all")]
    pub severity: String,

    /// Relative window (30m, 2h, 1d) or an RFC 3339 timestamp
    #[arg(long, default_value = "1h")]
    pub since: String,

    /// Maximum number of entries
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Only entries containing this text
    #[arg(long)]
    pub search: Option<String>,
}

/// Outcome of argument parsing
#[derive(Debug)]
pub enum Parsed {
    /// A command to run
    Run(Cli),
    /// `--help` or `--version` output
    Help(String),
}

/// Parse arguments; usage errors become `INVALID_USAGE`
pub fn parse<I, T>(args: I) -> Result<Parsed, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Parsed::Run(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(Parsed::Help(err.render().to_string()))
            }
            _ => {
                let rendered = err.render().to_string();
                let message = rendered
                    .lines()
                    .find(|l| !l.trim().is_empty())
                    .unwrap_or("invalid usage")
                    .trim_start_matches("error: ")
                    .trim()
                    .to_string();
                Err(CliError::new(ErrorCode::InvalidUsage, message)
                    .with_suggestion("Run: zaia --help"))
            }
        },
    }
}
