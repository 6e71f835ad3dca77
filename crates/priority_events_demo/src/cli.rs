//! Command-line interface handling for the demo.
//!
//! Uses the `clap` builder API to parse options that override values from
//! the configuration file.

use clap::{Arg, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Optional override for the per-event listener ceiling
    pub max_listeners: Option<usize>,
    /// Optional override for the number of orders emitted
    pub orders: Option<u32>,
}

impl CliArgs {
    /// Parses the process arguments.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    fn command() -> Command {
        Command::new("Priority Events Demo")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Runs an order pipeline through the priority event emitter")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value("priority-events.toml"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("max-listeners")
                    .short('m')
                    .long("max-listeners")
                    .value_name("N")
                    .help("Listener ceiling per event name (0 disables the warning)")
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("orders")
                    .short('n')
                    .long("orders")
                    .value_name("COUNT")
                    .help("Number of orders to emit")
                    .value_parser(clap::value_parser!(u32)),
            )
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_default(),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            max_listeners: matches.get_one::<usize>("max-listeners").copied(),
            orders: matches.get_one::<u32>("orders").copied(),
        }
    }
}
