// core/env.rs

//! # Environment Variable Handling
//!
//! Placeholder substitution never reads `std::env` directly; it asks an
//! `EnvLookup`. The process environment, a plain `HashMap`, and a layered
//! environment built from a `.env` file plus `KEY=VALUE` overrides all
//! implement it.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::error::{ArgsError, ArgsResult};

/// Read-only access to environment variables.
pub trait EnvLookup {
    /// Returns the value of `name`, or `None` if it is unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Variables loaded from a .env file and CLI overrides, optionally backed by
/// the process environment.
#[derive(Debug, Default, Clone)]
pub struct LayeredEnv {
    vars: HashMap<String, String>,
    use_process_env: bool,
}

impl LayeredEnv {
    /// Load variables from a .env file and apply `KEY=VALUE` overrides on top.
    /// Lookups that miss both fall through to the process environment.
    ///
    /// # Arguments
    /// * `env_file` - Path to the .env file; a missing file is not an error
    /// * `overrides` - Additional KEY=VALUE pairs from `-e` CLI flags
    ///
    /// # Errors
    /// Returns `ArgsError::InvalidArgument` for an override without `=`.
    pub fn load(env_file: &str, overrides: &[String]) -> ArgsResult<Self> {
        let mut vars = HashMap::new();

        let dotenv_path = Path::new(env_file);
        if dotenv_path.exists() {
            debug!("Loading environment variables from: {}", env_file);
            match dotenvy::from_path_iter(dotenv_path) {
                Ok(iter) => {
                    for item in iter {
                        match item {
                            Ok((key, value)) => {
                                debug!("  Loaded env var: {}", key);
                                vars.insert(key, value);
                            }
                            Err(e) => {
                                debug!("  Skipping malformed .env entry: {}", e);
                            }
                        }
                    }
                }
                Err(e) => {
                    debug!("Warning: could not load .env file: {}", e);
                }
            }
        } else {
            debug!("No .env file found at: {}", env_file);
        }

        for override_str in overrides {
            let (key, value) = parse_env_var(override_str)
                .ok_or_else(|| ArgsError::InvalidArgument(override_str.clone()))?;
            debug!("  Override env var: {}", key);
            vars.insert(key, value);
        }

        Ok(Self {
            vars,
            use_process_env: true,
        })
    }

    /// An environment that only knows `vars` and never consults the process.
    pub fn isolated(vars: HashMap<String, String>) -> Self {
        Self {
            vars,
            use_process_env: false,
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvLookup for LayeredEnv {
    fn get(&self, name: &str) -> Option<String> {
        match self.vars.get(name) {
            Some(value) => Some(value.clone()),
            None if self.use_process_env => ProcessEnv.get(name),
            None => None,
        }
    }
}

/// Parse a single KEY=VALUE string. The value may itself contain `=`.
pub fn parse_env_var(s: &str) -> Option<(String, String)> {
    let (key, value) = s.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}
