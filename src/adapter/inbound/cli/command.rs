//! Command-line interface definitions.
//!
//! Defines the CLI structure for the orderhub service using `clap`: running
//! the ingestion service, publishing order files to the bus, and reading
//! orders back.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Order ingestion service: NATS in, SQLite and an in-process cache out
#[derive(Parser, Debug)]
#[command(name = "orderhub")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the orderhub CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Consume orders from the bus until interrupted
    Run(RunArgs),

    /// Publish order JSON files to the bus
    Publish(PublishArgs),

    /// Print one order by UID
    Order(OrderArgs),

    /// Print every stored order
    Orders(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `publish` command.
#[derive(Args, Debug)]
pub struct PublishArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Publish on this subject instead of the configured one.
    #[arg(long)]
    pub subject: Option<String>,

    /// JSON files, one order per file.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the `order` command.
#[derive(Args, Debug)]
pub struct OrderArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// The order UID to look up.
    pub order_uid: String,
}
