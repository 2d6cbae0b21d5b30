//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Contractor timer.
///
/// Logs billable time against a project, either from a start and end time or
/// by running work/break cycles, and writes a cost report.
#[derive(Debug, Parser)]
#[command(name = "ct", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Time a session and write its cost report.
    ///
    /// Anything not given as a flag is asked for on the console.
    Track(TrackArgs),

    /// Show the effective configuration.
    Config,
}

/// Inputs for one tracked session.
#[derive(Debug, Default, Args)]
pub struct TrackArgs {
    /// Contractor name printed on the report.
    #[arg(long)]
    pub contractor: Option<String>,

    /// Project the time is billed to.
    #[arg(long)]
    pub project: Option<String>,

    /// Cost per hour. Overrides `hourly_rate` from the config.
    #[arg(long)]
    pub rate: Option<f64>,

    /// Timer mode: 1 (manual) or 2 (automatic).
    #[arg(long)]
    pub mode: Option<String>,

    /// Manual start time (yyyy-MM-dd HH:mm:ss).
    #[arg(long)]
    pub start: Option<String>,

    /// Manual end time (yyyy-MM-dd HH:mm:ss).
    #[arg(long)]
    pub end: Option<String>,

    /// Automatic target duration in hours.
    #[arg(long)]
    pub hours: Option<String>,

    /// Directory the report is written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}
