//! CLI argument definitions for the Vizboard client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vizboard",
    version,
    about = "Vizboard client - check, fetch, save and export visualisations",
    long_about = "Work with Vizboard visualisations from the command line.\n\n\
                  Offline commands (check, deps, derive-category) read JSON files.\n\
                  The other commands talk to the Vizboard API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API server, overriding the configured one.
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check whether a visualisation can be rendered with the given datasets.
    Check(CheckArgs),

    /// List the datasets a visualisation depends on.
    Deps(DepsArgs),

    /// List visualisations on the server.
    List(ListArgs),

    /// Fetch a visualisation and the datasets it depends on.
    Fetch(IdArgs),

    /// Save a visualisation from a JSON file.
    Save(SaveArgs),

    /// Delete a visualisation.
    Delete(IdArgs),

    /// Export a visualisation and open the file.
    Export(ExportArgs),

    /// Get a share id for a visualisation.
    Share(IdArgs),

    /// Build a derive-category transformation for a dataset column.
    DeriveCategory(DeriveCategoryArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Visualisation JSON file.
    #[arg(value_name = "VISUALISATION")]
    pub visualisation: PathBuf,

    /// Dataset JSON file (repeatable).
    #[arg(long = "dataset", value_name = "PATH")]
    pub datasets: Vec<PathBuf>,

    /// Window height used to size the preview.
    #[arg(long = "window-height", default_value_t = 900)]
    pub window_height: u32,
}

#[derive(Parser)]
pub struct DepsArgs {
    /// Visualisation JSON file.
    #[arg(value_name = "VISUALISATION")]
    pub visualisation: PathBuf,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Only show visualisations whose name contains this text.
    #[arg(long = "filter", default_value = "")]
    pub filter: String,

    /// Dashboard JSON file; marks visualisations already placed on it.
    #[arg(long = "dashboard", value_name = "PATH")]
    pub dashboard: Option<PathBuf>,
}

#[derive(Parser)]
pub struct IdArgs {
    /// Visualisation id.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Parser)]
pub struct SaveArgs {
    /// Visualisation JSON file.
    #[arg(value_name = "VISUALISATION")]
    pub visualisation: PathBuf,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Visualisation id.
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Export format (default from settings).
    #[arg(long = "format")]
    pub format: Option<String>,

    /// Print the file URL without opening it.
    #[arg(long = "no-open")]
    pub no_open: bool,
}

#[derive(Parser)]
pub struct DeriveCategoryArgs {
    /// Dataset JSON file with columns and rows.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Source column name.
    #[arg(long = "column")]
    pub column: String,

    /// Title of the new column.
    #[arg(long = "title")]
    pub title: String,

    /// Category for values no rule matches.
    #[arg(long = "fallback", default_value = "Uncategorized")]
    pub fallback: String,

    /// Mapping rule (repeatable): `North,South=Coastal` for text columns,
    /// `>=18&<65=Adult` for number columns.
    #[arg(long = "map", value_name = "RULE")]
    pub rules: Vec<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
