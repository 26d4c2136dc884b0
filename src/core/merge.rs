// core/merge.rs

//! # Argument Merging
//!
//! Merges a file argument tree into a baseline argument set. File values win,
//! but only for keys the baseline knows and only when the value kinds match
//! exactly. Nested mappings are opaque: a file mapping replaces the baseline
//! mapping wholesale.

use log::debug;

use crate::core::value::ArgMap;
use crate::error::{ArgsError, ArgsResult};

/// Merge `file_args` over `baseline`, returning a new argument set.
///
/// The result has exactly the baseline's keys, in the baseline's order. A
/// non-null file value replaces the baseline value for the same key; a null
/// or absent one keeps it.
///
/// # Errors
/// * `ArgsError::TypeMismatch` if a shared key has a non-null file value of a
///   different kind than the baseline value.
/// * `ArgsError::UnknownArgument` if `ignore_unknown` is false and the file
///   has a key the baseline lacks.
pub fn merge_args(
    file_args: &ArgMap,
    baseline: &ArgMap,
    ignore_unknown: bool,
) -> ArgsResult<ArgMap> {
    let mut merged = ArgMap::with_capacity(baseline.len());

    for (key, cli_value) in baseline {
        match file_args.get(key) {
            Some(file_value) if !file_value.is_null() => {
                let expected = cli_value.kind();
                let found = file_value.kind();
                if found != expected {
                    return Err(ArgsError::TypeMismatch {
                        key: key.clone(),
                        expected,
                        found,
                    });
                }
                debug!("Argument [{}] taken from YAML config", key);
                merged.insert(key.clone(), file_value.clone());
            }
            _ => {
                merged.insert(key.clone(), cli_value.clone());
            }
        }
    }

    for key in file_args.keys().filter(|key| !baseline.contains_key(*key)) {
        if !ignore_unknown {
            return Err(ArgsError::UnknownArgument(key.clone()));
        }
        debug!("Ignoring unknown argument [{}] in YAML config", key);
    }

    Ok(merged)
}
