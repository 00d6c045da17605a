//! CLI argument definitions for the referendum map.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "referendum",
    version,
    about = "Referendum results per region, with a choropleth map",
    long_about = "Join referendum results onto departments and regions, sum the votes\n\
                  per region and draw the share of Choice A on a map.\n\n\
                  Reads referendum.csv, regions.csv, departments.csv and\n\
                  regions.geojson from the data directory."
)]
pub struct Cli {
    /// Directory holding the source files.
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Path of the SVG map to write.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "referendum_map.svg"
    )]
    pub output: PathBuf,

    /// How referendum rows without a known department are handled.
    ///
    /// `inner` drops them; `left` keeps them through the join and leaves
    /// them out of the per-region sums.
    #[arg(long = "join-mode", value_enum, default_value = "inner")]
    pub join_mode: JoinModeArg,

    /// Print the results table without drawing the map.
    #[arg(long = "no-map")]
    pub no_map: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI join mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum JoinModeArg {
    Inner,
    Left,
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
