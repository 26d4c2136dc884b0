// utils/logging.rs

use log::LevelFilter;

/// Sets the logger level based on the provided argument.
pub fn initialize_logger(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter(None, level)
        .format_timestamp(None)
        .init();
}
