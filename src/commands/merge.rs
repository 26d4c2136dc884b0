// commands/merge.rs

//! # Merge Command Module
//!
//! The `merge` command loads a YAML configuration file, merges it over the
//! baseline arguments built from `--defaults` and `--arg`, and prints the
//! effective arguments to stdout as YAML or JSON.
//!
//! ## Example Usage
//! ```bash
//! ./yaml-args merge train.yaml --defaults defaults.yaml --arg num_epochs=10
//! ./yaml-args merge train.yaml -a batch_size=32 -e DATA_ROOT=/mnt --format json
//! ```

use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};

use yaml_args::{ArgMap, ArgsError, ArgsResult};

use crate::app::{DEFAULT_OUTPUT_FORMAT, OUTPUT_FORMATS};
use crate::commands::common_args::{
    arg_override, args_from_matches, config, defaults, env_file, env_var, ignore_unknown,
    load_from_args,
};
use crate::print_error;
use crate::utils::display::log_common_command_args;

/// Configures the `merge` command for the CLI application.
pub fn command() -> Command {
    Command::new("merge")
        .about("Merge a YAML config over baseline arguments and print the result")
        .arg(config())
        .arg(defaults())
        .arg(arg_override())
        .arg(ignore_unknown())
        .arg(env_file())
        .arg(env_var())
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS))
                .default_value(DEFAULT_OUTPUT_FORMAT)
                .action(ArgAction::Set),
        )
}

/// Executes the `merge` command.
pub fn execute(matches: &ArgMatches) {
    let args = args_from_matches(matches);
    log_common_command_args(&args);

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(DEFAULT_OUTPUT_FORMAT);

    let rendered = load_from_args(&args).and_then(|loaded| render(&loaded.merged, format));

    match rendered {
        Ok(output) => print!("{}", output),
        Err(e) => {
            print_error!("{}", e);
            process::exit(1);
        }
    }
}

/// Serialize merged arguments in the requested format.
fn render(args: &ArgMap, format: &str) -> ArgsResult<String> {
    match format {
        "json" => serde_json::to_string_pretty(args)
            .map(|json| format!("{}\n", json))
            .map_err(|e| ArgsError::InvalidDocument(format!("cannot render JSON: {}", e))),
        _ => serde_yaml::to_string(args)
            .map_err(|e| ArgsError::InvalidDocument(format!("cannot render YAML: {}", e))),
    }
}
