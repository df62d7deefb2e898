//! Clap derive structures for the `prtg` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// prtg -- look up, summarise and provision PRTG devices
#[derive(Debug, Parser)]
#[command(
    name = "prtg",
    version,
    about = "Query and provision devices on a PRTG Network Monitor server",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "PRTG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// PRTG server URL (overrides config)
    #[arg(long, short = 'u', global = true)]
    pub url: Option<String>,

    /// API token (overrides config)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PRTG_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Skip the on-disk lookup cache for this run
    #[arg(long, global = true)]
    pub no_cache: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or write the config file
    Config(ConfigArgs),

    #[command(flatten)]
    Server(ServerCommand),
}

/// Commands that talk to a PRTG server.
#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Test the connection and show the server version
    Status,

    /// Resolve a device and summarise its sensors
    #[command(alias = "dev")]
    Device(DeviceArgs),

    /// List a device's sensors
    Sensors(DeviceArgs),

    /// Sensor status counts across the whole server
    Summary(SummaryArgs),

    /// Create a device (with auto-discovery) unless it already exists
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Device name, hostname or IP as known to the inventory
    pub name: String,

    /// Known PRTG device id; skips the lookup
    #[arg(long)]
    pub id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Cache lifetime in seconds, clamped to 60-3600
    #[arg(long)]
    pub cache_ttl: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Device name to create
    pub name: String,

    /// Hostname or IP address PRTG should probe
    pub host: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings (token masked)
    Show,

    /// Print the config file path
    Path,

    /// Write a config file from --url, --api-token and --insecure
    Init(InitArgs),
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Read the token from this environment variable instead of storing it
    #[arg(long)]
    pub token_env: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
