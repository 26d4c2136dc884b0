// commands/common_args.rs

//! # Common Command Arguments
//!
//! Arguments shared by the `merge` and `check` commands, and the code that
//! turns them into a baseline argument set and a merged result.

use clap::{Arg, ArgAction, ArgMatches};

use yaml_args::core::env::parse_env_var;
use yaml_args::{
    load_yaml_with_env, read_args_file, ArgMap, ArgValue, ArgsError, ArgsResult, EnvLookup,
    LayeredEnv,
};

use crate::app::DEFAULT_ENV_FILE;

// Positional arguments
/// Common positional argument for the YAML configuration file
pub fn config() -> Arg {
    Arg::new("config")
        .required(true)
        .help("Path to the YAML configuration file")
}

// Optional arguments
/// YAML file holding the baseline (default) arguments
pub fn defaults() -> Arg {
    Arg::new("defaults")
        .long("defaults")
        .short('d')
        .help("YAML file with the baseline arguments")
        .action(ArgAction::Set)
}

/// Baseline arguments given on the command line
pub fn arg_override() -> Arg {
    Arg::new("arg")
        .long("arg")
        .short('a')
        .help("Set a baseline argument (format: KEY=VALUE, VALUE typed as a YAML scalar)")
        .action(ArgAction::Append)
}

/// Common argument for ignoring unknown keys in the configuration file
pub fn ignore_unknown() -> Arg {
    Arg::new("ignore-unknown")
        .long("ignore-unknown")
        .help("Drop keys in the YAML file that have no baseline argument")
        .action(ArgAction::SetTrue)
}

/// Common argument for specifying an environment file
pub fn env_file() -> Arg {
    Arg::new("env-file")
        .long("env-file")
        .help("Environment variables file")
        .default_value(DEFAULT_ENV_FILE)
}

/// Common argument for setting additional environment variables
pub fn env_var() -> Arg {
    Arg::new("env")
        .short('e')
        .long("env")
        .help("Set additional environment variables (format: KEY=VALUE)")
        .action(ArgAction::Append)
}

/// Structure to hold common command arguments
#[derive(Debug)]
pub struct CommonCommandArgs<'a> {
    /// YAML configuration file
    pub config: &'a str,
    /// Optional file with baseline arguments
    pub defaults: Option<&'a str>,
    /// Baseline `KEY=VALUE` arguments, applied after `defaults`
    pub arg_overrides: Vec<String>,
    /// Environment file path
    pub env_file: &'a str,
    /// `KEY=VALUE` environment overrides
    pub env_overrides: Vec<String>,
    /// Whether unknown YAML keys are dropped instead of rejected
    pub ignore_unknown: bool,
}

/// Create CommonCommandArgs from ArgMatches
pub fn args_from_matches(matches: &ArgMatches) -> CommonCommandArgs<'_> {
    let strings = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    };

    CommonCommandArgs {
        config: matches
            .get_one::<String>("config")
            .map(String::as_str)
            .unwrap_or_default(),
        defaults: matches.get_one::<String>("defaults").map(String::as_str),
        arg_overrides: strings("arg"),
        env_file: matches
            .get_one::<String>("env-file")
            .map(String::as_str)
            .unwrap_or(DEFAULT_ENV_FILE),
        env_overrides: strings("env"),
        ignore_unknown: matches.get_flag("ignore-unknown"),
    }
}

/// Build the baseline argument set: the defaults file first, then each
/// `--arg KEY=VALUE` in order.
pub fn build_baseline(args: &CommonCommandArgs, env: &dyn EnvLookup) -> ArgsResult<ArgMap> {
    let mut baseline = match args.defaults {
        Some(path) => read_args_file(path, env)?,
        None => ArgMap::new(),
    };

    for raw in &args.arg_overrides {
        let (key, value) =
            parse_env_var(raw).ok_or_else(|| ArgsError::InvalidArgument(raw.clone()))?;
        baseline.insert(key, ArgValue::parse_scalar(&value));
    }

    Ok(baseline)
}

/// Result of running the load pipeline for a command.
#[derive(Debug)]
pub struct LoadedArgs {
    pub baseline: ArgMap,
    pub merged: ArgMap,
}

impl LoadedArgs {
    /// Keys whose merged value differs from the baseline.
    pub fn overridden_keys(&self) -> Vec<&str> {
        self.merged
            .iter()
            .filter(|(key, value)| self.baseline.get(*key) != Some(*value))
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

/// Assemble the environment and baseline, then load and merge the config file.
pub fn load_from_args(args: &CommonCommandArgs) -> ArgsResult<LoadedArgs> {
    let env = LayeredEnv::load(args.env_file, &args.env_overrides)?;
    let baseline = build_baseline(args, &env)?;
    let merged = load_yaml_with_env(args.config, &baseline, args.ignore_unknown, &env)?;
    Ok(LoadedArgs { baseline, merged })
}
