// utils/display.rs

//! # Display Utility Module
//!
//! Styled terminal output for the CLI: a Unicode message box for headers and
//! color-coded macros for errors and successes. Machine-readable output (the
//! merged arguments) is printed plainly by the commands themselves.
//!
//! ## Example Usage
//! ```rust,ignore
//! use crate::utils::display::print_unicode_box;
//!
//! print_unicode_box("Checking train.yaml");
//! print_error!("Unknown argument 'lr' in YAML config.");
//! print_success!("train.yaml is valid");
//! ```

use log::debug;
use unicode_width::UnicodeWidthStr;

use crate::commands::common_args::CommonCommandArgs;

/// Utility function to print a Unicode-styled message box
/// that correctly handles the width of emojis and other wide characters
pub fn print_unicode_box(message: &str) {
    let border_color = "\x1b[93m"; // Yellow
    let reset_color = "\x1b[0m";
    let lines: Vec<&str> = message.split('\n').collect();

    let max_length = lines
        .iter()
        .map(|line| UnicodeWidthStr::width(*line))
        .max()
        .unwrap_or(0);

    let border = "─".repeat(max_length + 2);
    println!("{}┌{}┐{}", border_color, border, reset_color);
    for line in lines {
        let padding = max_length - UnicodeWidthStr::width(line);
        println!(
            "{}│ {}{} │{}",
            border_color,
            line,
            " ".repeat(padding),
            reset_color
        );
    }
    println!("{}└{}┘{}", border_color, border, reset_color);
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).red())
    }};
}

#[macro_export]
macro_rules! print_success {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{}", format!($($arg)*).green())
    }};
}

/// Log common command arguments at debug level
pub fn log_common_command_args(args: &CommonCommandArgs) {
    debug!("Config File: {}", args.config);
    debug!("Defaults File: {}", args.defaults.unwrap_or("(none)"));
    debug!("Environment File: {}", args.env_file);
    debug!("Ignore Unknown: {}", args.ignore_unknown);

    if !args.arg_overrides.is_empty() {
        debug!("Argument Overrides:");
        for arg in &args.arg_overrides {
            debug!("  - {}", arg);
        }
    }

    // Only names: values may hold secrets
    if !args.env_overrides.is_empty() {
        debug!("Environment Overrides:");
        for var in &args.env_overrides {
            let name = var.split_once('=').map_or(var.as_str(), |(name, _)| name);
            debug!("  - {}", name);
        }
    }
}
