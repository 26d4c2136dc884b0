// commands/check.rs

//! # Check Command Module
//!
//! The `check` command runs the same load and merge as `merge` but only
//! reports whether the configuration is usable and which arguments it
//! overrides. Exits with status 1 on the first error.
//!
//! ## Example Usage
//! ```bash
//! ./yaml-args check train.yaml --defaults defaults.yaml
//! ```

use std::process;

use clap::{ArgMatches, Command};
use colored::*;

use crate::commands::common_args::{
    arg_override, args_from_matches, config, defaults, env_file, env_var, ignore_unknown,
    load_from_args,
};
use crate::utils::display::{log_common_command_args, print_unicode_box};
use crate::{print_error, print_success};

/// Configures the `check` command for the CLI application.
pub fn command() -> Command {
    Command::new("check")
        .about("Validate a YAML config against baseline arguments")
        .arg(config())
        .arg(defaults())
        .arg(arg_override())
        .arg(ignore_unknown())
        .arg(env_file())
        .arg(env_var())
}

/// Executes the `check` command.
pub fn execute(matches: &ArgMatches) {
    let args = args_from_matches(matches);
    log_common_command_args(&args);

    print_unicode_box(&format!("Checking {}", args.config));

    match load_from_args(&args) {
        Ok(loaded) => {
            let overridden = loaded.overridden_keys();
            for key in &overridden {
                println!("  {} {}", "override".yellow(), key);
            }
            print_success!(
                "{} is valid: {} arguments, {} overridden by the config file",
                args.config,
                loaded.merged.len(),
                overridden.len()
            );
        }
        Err(e) => {
            print_error!("{}", e);
            process::exit(1);
        }
    }
}
