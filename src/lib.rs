// lib.rs

//! # yaml-args
//!
//! Loads a YAML configuration file, expands `${NAME}` environment references
//! in its string values, and merges it over a baseline argument set (usually
//! produced by a command-line parser). File values take precedence, but must
//! match the baseline's type for the same key.
//!
//! ## Example Usage
//! ```rust
//! use std::collections::HashMap;
//! use yaml_args::{merge_args, parse_args_str, ArgMap, ArgValue};
//!
//! let mut env = HashMap::new();
//! env.insert("DATA_ROOT".to_string(), "/mnt/data".to_string());
//!
//! let file_args = parse_args_str("data_path: ${DATA_ROOT}/train\nbatch_size: 64\n", &env).unwrap();
//!
//! let mut baseline = ArgMap::new();
//! baseline.insert("data_path".to_string(), ArgValue::from("/default"));
//! baseline.insert("batch_size".to_string(), ArgValue::from(32));
//! baseline.insert("num_epochs".to_string(), ArgValue::from(10));
//!
//! let merged = merge_args(&file_args, &baseline, false).unwrap();
//! assert_eq!(merged["data_path"], ArgValue::from("/mnt/data/train"));
//! assert_eq!(merged["batch_size"], ArgValue::from(64));
//! assert_eq!(merged["num_epochs"], ArgValue::from(10));
//! ```

pub mod core;
pub mod error;

pub use crate::core::env::{EnvLookup, LayeredEnv, ProcessEnv};
pub use crate::core::loader::{
    load_yaml, load_yaml_with_env, parse_args_str, read_args_file, EXPERIMENTAL_WARNING,
};
pub use crate::core::merge::merge_args;
pub use crate::core::substitution::{placeholder_names, substitute_env_vars};
pub use crate::core::value::{ArgKind, ArgMap, ArgValue};
pub use crate::error::{ArgsError, ArgsResult};
