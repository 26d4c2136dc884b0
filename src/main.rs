// main.rs

//! # yaml-args - Main Entry Point
//!
//! Command-line front end for the `yaml_args` library. It builds a baseline
//! argument set from a defaults file and `--arg KEY=VALUE` flags, merges a
//! YAML configuration over it, and prints or validates the result.
//!
//! ## Global Arguments
//!
//! - `--log-level` - The logging level (default: `info`). Possible values: `error`, `warn`, `info`, `debug`, `trace`.
//!
//! ## Example Usage
//! ```bash
//! ./yaml-args merge train.yaml --defaults defaults.yaml -e DATA_ROOT=/mnt
//! ./yaml-args check train.yaml --arg batch_size=32 --ignore-unknown
//! ```
//!
//! For detailed help, use `--help` or `-h` flags.

mod app;
mod commands;
mod utils;

use std::process;

use clap::{Arg, ArgAction, Command};
use log::debug;

use crate::app::{
    APP_AUTHOR, APP_DESCRIPTION, APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL, LOG_LEVELS,
};
use crate::utils::logging::initialize_logger;

/// Main function that initializes the CLI and handles command execution.
fn main() {
    let matches = Command::new(APP_NAME)
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_DESCRIPTION)
        // ====================
        // Global Flags
        // ====================
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Set the logging level")
                .global(true)
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS))
                .ignore_case(true)
                .default_value(DEFAULT_LOG_LEVEL)
                .action(ArgAction::Set),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // ====================
        // Subcommand Definitions
        // ====================
        .subcommand(commands::merge::command())
        .subcommand(commands::check::command())
        .get_matches();

    // ====================
    // Initialize Logger
    // ====================
    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(DEFAULT_LOG_LEVEL);
    initialize_logger(log_level);

    debug!("Logger initialized with level: {}", log_level);

    // ====================
    // Command Execution
    // ====================
    match matches.subcommand() {
        Some(("merge", sub_matches)) => commands::merge::execute(sub_matches),
        Some(("check", sub_matches)) => commands::check::execute(sub_matches),
        _ => {
            print_error!("Unknown command. Use --help for usage.");
            process::exit(1);
        }
    }
}
