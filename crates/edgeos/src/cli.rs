//! Clap derive structures for the `edgeos` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Platform names accepted by `--platform`.
pub const PLATFORM_NAMES: [&str; 6] = [
    "sensor",
    "binary_sensor",
    "switch",
    "number",
    "select",
    "device_tracker",
];

/// Device type names accepted by `--device-type`.
pub const DEVICE_TYPE_NAMES: [&str; 3] = ["system", "interface", "device"];

// ── Top-Level CLI ────────────────────────────────────────────────────

/// edgeos -- entity catalog and device inspector for EdgeOS routers
#[derive(Debug, Parser)]
#[command(
    name = "edgeos",
    version,
    about = "Inspect the EdgeOS router entity catalog and device traffic",
    long_about = "Query which entities the EdgeOS integration exposes for a given\n\
        platform, object type and session, inspect device traffic snapshots,\n\
        and manage integration settings.",
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
    /// Config file path (overrides the platform default)
    #[arg(long, env = "EDGEOS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EDGEOS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
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
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every entity descriptor in catalog order
    Catalog,

    /// Select the entities exposed for a platform, object type and session
    #[command(alias = "select")]
    Entities(EntitiesArgs),

    /// List the distinct platforms used by the catalog
    Platforms,

    /// Inspect device records and their traffic
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage integration settings
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Entities ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    /// Entity platform
    #[arg(long, short = 'p', value_parser = PLATFORM_NAMES)]
    pub platform: String,

    /// Object type the entities attach to
    #[arg(long, short = 't', value_parser = DEVICE_TYPE_NAMES)]
    pub device_type: String,

    /// Whether the object is monitored (omit when unknown)
    #[arg(long, value_parser = BoolishValueParser::new(), conflicts_with = "item")]
    pub monitored: Option<bool>,

    /// Resolve the monitored flag from settings for this MAC or interface name
    #[arg(long)]
    pub item: Option<String>,

    /// Whether the session is an admin session (omit when unknown)
    #[arg(long, value_parser = BoolishValueParser::new(), conflicts_with = "user_level")]
    pub admin: Option<bool>,

    /// Derive the admin flag from a router user level (e.g. "admin")
    #[arg(long)]
    pub user_level: Option<String>,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// Load device snapshots from a JSON file and report activity
    Inspect {
        /// JSON file holding a list of device snapshots
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// Show identity attributes only, without traffic counters
        #[arg(long)]
        simple: bool,

        /// Drop devices whose DHCP lease is gone
        #[arg(long)]
        leased_only: bool,

        /// Reference time for age calculation (RFC 3339, default now)
        #[arg(long)]
        at: Option<String>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set an integration setting
    Set {
        /// Setting name (e.g. "consider_away_interval", "unit")
        key: String,

        /// Value to set
        value: String,
    },

    /// Enable or disable monitoring for a device or interface
    Monitor {
        /// What to monitor
        #[arg(value_parser = ["device", "interface"])]
        kind: String,

        /// MAC address or interface name
        id: String,

        /// Monitoring state (true/false, on/off)
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        enabled: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
