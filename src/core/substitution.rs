// core/substitution.rs

//! # Placeholder Substitution
//!
//! Expands `${NAME}` references in string scalars using an `EnvLookup`.
//! Only plain references are supported: no defaults, no expressions, and a
//! substituted value is never scanned again.

use once_cell::sync::Lazy;
use regex::Regex;

use log::debug;

use crate::core::env::EnvLookup;
use crate::error::{ArgsError, ArgsResult};

/// `${NAME}` where NAME is one or more characters other than `}`.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Replace every `${NAME}` in `value` with the variable's value.
///
/// # Errors
/// Returns `ArgsError::MissingEnvironmentVariable` for the first referenced
/// variable that `env` does not know.
pub fn substitute_env_vars(value: &str, env: &dyn EnvLookup) -> ArgsResult<String> {
    if !value.contains("${") {
        return Ok(value.to_string());
    }

    let mut result = String::with_capacity(value.len());
    let mut last_end = 0;

    for caps in PLACEHOLDER_RE.captures_iter(value) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let resolved = env
            .get(name.as_str())
            .ok_or_else(|| ArgsError::MissingEnvironmentVariable(name.as_str().to_string()))?;
        debug!("Resolved ${{{}}} in YAML value", name.as_str());

        result.push_str(&value[last_end..whole.start()]);
        result.push_str(&resolved);
        last_end = whole.end();
    }

    result.push_str(&value[last_end..]);
    Ok(result)
}

/// Names referenced by `${NAME}` placeholders in `value`, in order of appearance.
pub fn placeholder_names(value: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(value)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
