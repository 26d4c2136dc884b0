// error.rs

//! # Error Handling Module
//!
//! Defines `ArgsError`, the single error type returned by every fallible
//! operation in this crate. All variants are fatal: a load either produces a
//! complete merged argument set or fails without partial results.
//!
//! # Usage Example
//! ```rust
//! use yaml_args::error::{ArgsError, ArgsResult};
//!
//! fn example_function() -> ArgsResult<()> {
//!     Err(ArgsError::UnknownArgument("lr".to_string()))
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::core::value::ArgKind;

// ============================
// Error Definitions
// ============================

/// Errors that can occur while loading and merging YAML arguments.
#[derive(Error, Debug)]
pub enum ArgsError {
    /// A `${NAME}` placeholder references an unset environment variable.
    #[error("environment variable {0} in yaml not found")]
    MissingEnvironmentVariable(String),

    /// A file value has a different type than the baseline value for the same key.
    #[error("Invalid type for '{key}' in YAML. Expected '{expected}', got '{found}'.")]
    TypeMismatch {
        key: String,
        expected: ArgKind,
        found: ArgKind,
    },

    /// A file key has no counterpart in the baseline argument set.
    #[error("Unknown argument '{0}' in YAML config.")]
    UnknownArgument(String),

    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed YAML.
    #[error("Failed to parse YAML in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document is valid YAML but cannot be used as an argument set.
    #[error("Invalid YAML document: {0}")]
    InvalidDocument(String),

    /// A command-line `KEY=VALUE` pair is malformed.
    #[error("Invalid argument '{0}', expected KEY=VALUE")]
    InvalidArgument(String),
}

/// Type alias for results returned by this crate.
pub type ArgsResult<T> = Result<T, ArgsError>;
