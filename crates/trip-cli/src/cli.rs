//! CLI argument definitions for the itinerary viewer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "trip-viewer",
    version,
    about = "Itinerary viewer - merge CSV sources and search them from the terminal",
    long_about = "Merge one or more itinerary CSV sources into a unified table,\n\
                  classify their headers into semantic roles, and filter the rows\n\
                  by date/zone facets, a loose place filter, and free-text search."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Load sources and print the rows matching the given criteria.
    View(ViewArgs),

    /// Load sources and print the date/zone facet option lists per view.
    Facets(FacetsArgs),

    /// Print the role lexicon (semantic role -> header keywords).
    Roles(RolesArgs),
}

#[derive(Parser)]
pub struct ViewArgs {
    /// Source locators: filesystem paths or http(s) URLs.
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<String>,

    /// Restrict to one source's native view instead of the unified view.
    #[arg(long = "source", value_name = "SOURCE_ID")]
    pub scope: Option<String>,

    /// Date facet value (exact match; omit for any).
    #[arg(long)]
    pub date: Option<String>,

    /// Zone facet value (exact match; omit for any).
    #[arg(long)]
    pub zone: Option<String>,

    /// Loose place filter: substring of the place field or of any cell.
    #[arg(long)]
    pub place: Option<String>,

    /// Column to search; omit to search every column.
    #[arg(long, value_name = "HEADER")]
    pub column: Option<String>,

    /// Free-text query.
    #[arg(long)]
    pub query: Option<String>,

    /// Match whole cell values instead of substrings.
    #[arg(long = "whole-word")]
    pub whole_word: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser)]
pub struct FacetsArgs {
    /// Source locators: filesystem paths or http(s) URLs.
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser)]
pub struct RolesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Dataset-tuning configuration files shared by the subcommands.
#[derive(Parser)]
pub struct ConfigArgs {
    /// JSON file replacing the built-in role keyword lexicon.
    #[arg(long = "lexicon", value_name = "PATH")]
    pub lexicon: Option<PathBuf>,

    /// JSON file replacing the built-in ingest options (footer keywords).
    #[arg(long = "ingest-options", value_name = "PATH")]
    pub ingest_options: Option<PathBuf>,
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
