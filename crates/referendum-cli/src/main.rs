//! Referendum results map CLI.

use clap::{ColorChoice, Parser};
use referendum_cli::logging::{LogConfig, LogFormat, init_logging};
use referendum_cli::pipeline::{PipelineConfig, run_pipeline};
use referendum_model::JoinMode;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, JoinModeArg, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run_pipeline(&pipeline_config_from_cli(&cli)) {
        Ok(result) => {
            print_summary(&result);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn pipeline_config_from_cli(cli: &Cli) -> PipelineConfig {
    let join_mode = match cli.join_mode {
        JoinModeArg::Inner => JoinMode::Inner,
        JoinModeArg::Left => JoinMode::Left,
    };
    let config = PipelineConfig::in_dir(&cli.data_dir, cli.output.clone()).with_join_mode(join_mode);
    if cli.no_map {
        config.without_map()
    } else {
        config
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_from_flags() {
        let cli = Cli::parse_from(["referendum", "--data-dir", "input", "--join-mode", "left"]);
        let config = pipeline_config_from_cli(&cli);

        assert_eq!(config.join_mode, JoinMode::Left);
        let map = config.map.unwrap();
        assert_eq!(map.geometry, std::path::Path::new("input/regions.geojson"));
        assert_eq!(map.output, std::path::Path::new("referendum_map.svg"));
    }

    #[test]
    fn test_no_map_flag() {
        let cli = Cli::parse_from(["referendum", "--no-map"]);
        assert!(pipeline_config_from_cli(&cli).map.is_none());
    }

    #[test]
    fn test_explicit_log_level_disables_env_filter() {
        let cli = Cli::parse_from(["referendum", "--log-level", "debug", "--log-format", "compact"]);
        let config = log_config_from_cli(&cli);

        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
        assert_eq!(config.format, LogFormat::Compact);
    }
}
