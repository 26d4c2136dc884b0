// app.rs

//! # Application Constants
//!
//! Name, version and CLI defaults shared by `main.rs` and the command modules.

pub const APP_NAME: &str = "yaml-args";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const OUTPUT_FORMATS: &[&str] = &["yaml", "json"];
pub const DEFAULT_OUTPUT_FORMAT: &str = "yaml";
