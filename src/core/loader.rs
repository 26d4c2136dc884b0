// core/loader.rs

//! # YAML Argument Loader
//!
//! Reads a YAML configuration file, expands `${NAME}` placeholders while
//! converting it into an `ArgMap`, and merges the result over a baseline
//! argument set. Values from the file take precedence.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};
use serde_yaml::Value as YamlValue;

use crate::core::env::{EnvLookup, ProcessEnv};
use crate::core::merge::merge_args;
use crate::core::value::{ArgMap, ArgValue};
use crate::error::{ArgsError, ArgsResult};

/// Notice emitted on every load.
pub const EXPERIMENTAL_WARNING: &str =
    "Using experimental YAML argument feature, command line arguments will be overwritten.";

/// Load and merge a YAML configuration with baseline arguments, resolving
/// placeholders against the process environment.
///
/// # Arguments
/// * `path` - Path to the YAML configuration file
/// * `baseline` - Arguments from the command line; also the type reference
/// * `ignore_unknown` - Drop file keys the baseline does not know instead of failing
///
/// # Examples
///
/// ```no_run
/// use yaml_args::{load_yaml, ArgMap, ArgValue};
///
/// let mut baseline = ArgMap::new();
/// baseline.insert("batch_size".to_string(), ArgValue::from(32));
///
/// let args = load_yaml("train.yaml", &baseline, false).expect("valid config");
/// println!("batch_size = {:?}", args["batch_size"]);
/// ```
pub fn load_yaml(
    path: impl AsRef<Path>,
    baseline: &ArgMap,
    ignore_unknown: bool,
) -> ArgsResult<ArgMap> {
    load_yaml_with_env(path, baseline, ignore_unknown, &ProcessEnv)
}

/// Same as [`load_yaml`], resolving placeholders through `env`.
pub fn load_yaml_with_env(
    path: impl AsRef<Path>,
    baseline: &ArgMap,
    ignore_unknown: bool,
    env: &dyn EnvLookup,
) -> ArgsResult<ArgMap> {
    warn!("{}", EXPERIMENTAL_WARNING);

    let file_args = read_args_file(path.as_ref(), env)?;
    merge_args(&file_args, baseline, ignore_unknown)
}

/// Read and parse a YAML file into an argument tree without merging.
///
/// # Errors
/// * `ArgsError::FileNotFound` if `path` does not exist
/// * `ArgsError::Io` for any other read failure
/// * parse and substitution errors from [`parse_args_str`]
pub fn read_args_file(path: impl AsRef<Path>, env: &dyn EnvLookup) -> ArgsResult<ArgMap> {
    let path = path.as_ref();
    debug!("Reading YAML arguments from {}", path.display());

    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArgsError::FileNotFound(path.to_path_buf()),
        _ => ArgsError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_document(&contents, &path.display().to_string(), env)
}

/// Parse YAML text into an argument tree, expanding placeholders.
pub fn parse_args_str(contents: &str, env: &dyn EnvLookup) -> ArgsResult<ArgMap> {
    parse_document(contents, "<string>", env)
}

fn parse_document(contents: &str, origin: &str, env: &dyn EnvLookup) -> ArgsResult<ArgMap> {
    let parse_error = |source| ArgsError::Parse {
        origin: origin.to_string(),
        source,
    };

    let mut document: YamlValue = serde_yaml::from_str(contents).map_err(parse_error)?;
    // Expand `<<: *anchor` merge keys before conversion
    document.apply_merge().map_err(parse_error)?;

    match ArgValue::from_yaml(document, env)? {
        ArgValue::Mapping(map) => {
            debug!("Parsed {} top-level arguments from {}", map.len(), origin);
            Ok(map)
        }
        // An empty document contributes nothing
        ArgValue::Null => Ok(ArgMap::new()),
        other => Err(ArgsError::InvalidDocument(format!(
            "top-level value in {} must be a mapping, found {}",
            origin,
            other.kind()
        ))),
    }
}

/// Unit tests for loading YAML files.
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};

    use log::{Level, LevelFilter, Log, Metadata, Record};
    use tempfile::NamedTempFile;

    /// Records every log line with the thread that emitted it, so parallel
    /// tests only see their own output.
    struct CapturingLogger;

    static CAPTURED: Mutex<Vec<(ThreadId, Level, String)>> = Mutex::new(Vec::new());
    static LOGGER: CapturingLogger = CapturingLogger;
    static INIT_LOGGER: Once = Once::new();

    impl Log for CapturingLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut records) = CAPTURED.lock() {
                records.push((
                    thread::current().id(),
                    record.level(),
                    record.args().to_string(),
                ));
            }
        }

        fn flush(&self) {}
    }

    fn start_capture() {
        INIT_LOGGER.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
        take_warnings();
    }

    /// Drain this thread's captured warnings.
    fn take_warnings() -> Vec<String> {
        let current = thread::current().id();
        let mut records = CAPTURED.lock().unwrap();
        let (mine, others): (Vec<_>, Vec<_>) =
            records.drain(..).partition(|(id, _, _)| *id == current);
        *records = others;
        mine.into_iter()
            .filter(|(_, level, _)| *level == Level::Warn)
            .map(|(_, _, message)| message)
            .collect()
    }

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    fn baseline(entries: &[(&str, ArgValue)]) -> ArgMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_load_yaml_basic() {
        let file = yaml_file("learning_rate: 0.01\nbatch_size: 64\nnum_epochs: 100\n");
        let cli_args = baseline(&[
            ("learning_rate", ArgValue::from(0.001)),
            ("batch_size", ArgValue::from(32)),
            ("num_epochs", ArgValue::from(10)),
        ]);

        let result = load_yaml(file.path(), &cli_args, true).unwrap();

        assert_eq!(result["learning_rate"], ArgValue::from(0.01));
        assert_eq!(result["batch_size"], ArgValue::from(64));
        assert_eq!(result["num_epochs"], ArgValue::from(100));
    }

    #[test]
    fn test_load_yaml_partial_override() {
        let file = yaml_file("learning_rate: 0.01\nbatch_size: 64\n");
        let cli_args = baseline(&[
            ("learning_rate", ArgValue::from(0.001)),
            ("batch_size", ArgValue::from(32)),
            ("num_epochs", ArgValue::from(10)),
        ]);

        let result = load_yaml(file.path(), &cli_args, true).unwrap();

        assert_eq!(
            result,
            baseline(&[
                ("learning_rate", ArgValue::from(0.01)),
                ("batch_size", ArgValue::from(64)),
                ("num_epochs", ArgValue::from(10)),
            ])
        );
    }

    #[test]
    fn test_env_variable_substitution() {
        let mut env = HashMap::new();
        env.insert("TEST_VAR".to_string(), "/test/path".to_string());

        let file =
            yaml_file("data_path: ${TEST_VAR}/data\ncheckpoint_path: ${TEST_VAR}/checkpoints\n");
        let cli_args = baseline(&[
            ("data_path", ArgValue::from("/default/data")),
            ("checkpoint_path", ArgValue::from("/default/checkpoints")),
        ]);

        let result = load_yaml_with_env(file.path(), &cli_args, true, &env).unwrap();

        assert_eq!(result["data_path"], ArgValue::from("/test/path/data"));
        assert_eq!(
            result["checkpoint_path"],
            ArgValue::from("/test/path/checkpoints")
        );
    }

    #[test]
    fn test_process_env_substitution() {
        std::env::set_var("YAML_ARGS_LOADER_ROOT", "/scratch");

        let file = yaml_file("data_path: ${YAML_ARGS_LOADER_ROOT}/data\n");
        let cli_args = baseline(&[("data_path", ArgValue::from("/default/data"))]);

        let result = load_yaml(file.path(), &cli_args, false).unwrap();
        assert_eq!(result["data_path"], ArgValue::from("/scratch/data"));

        std::env::remove_var("YAML_ARGS_LOADER_ROOT");
    }

    #[test]
    fn test_missing_env_variable() {
        let env: HashMap<String, String> = HashMap::new();
        let file = yaml_file("data_path: ${YAML_ARGS_SURELY_UNSET}/data\n");
        let cli_args = baseline(&[("data_path", ArgValue::from("/default/data"))]);

        match load_yaml_with_env(file.path(), &cli_args, true, &env) {
            Err(ArgsError::MissingEnvironmentVariable(name)) => {
                assert_eq!(name, "YAML_ARGS_SURELY_UNSET")
            }
            other => panic!("Expected MissingEnvironmentVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_mapping_conversion() {
        let file = yaml_file(
            "optimizer:\n  type: adam\n  lr: 0.001\nmodel:\n  layers: 12\n  hidden_size: 768\n",
        );
        let cli_args = baseline(&[
            (
                "optimizer",
                ArgValue::from(baseline(&[
                    ("type", ArgValue::from("sgd")),
                    ("lr", ArgValue::from(0.01)),
                ])),
            ),
            (
                "model",
                ArgValue::from(baseline(&[
                    ("layers", ArgValue::from(6)),
                    ("hidden_size", ArgValue::from(512)),
                ])),
            ),
        ]);

        let result = load_yaml(file.path(), &cli_args, true).unwrap();

        let optimizer = result["optimizer"].as_mapping().unwrap();
        assert_eq!(optimizer["type"], ArgValue::from("adam"));
        assert_eq!(optimizer["lr"], ArgValue::from(0.001));

        let model = result["model"].as_mapping().unwrap();
        assert_eq!(model["layers"], ArgValue::from(12));
        assert_eq!(model["hidden_size"], ArgValue::from(768));
    }

    #[test]
    fn test_unknown_argument_in_file() {
        let file = yaml_file("batch_size: 64\nmystery: 1\n");
        let cli_args = baseline(&[("batch_size", ArgValue::from(32))]);

        match load_yaml(file.path(), &cli_args, false) {
            Err(ArgsError::UnknownArgument(key)) => assert_eq!(key, "mystery"),
            other => panic!("Expected UnknownArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch_in_file() {
        let file = yaml_file("batch_size: \"64\"\n");
        let cli_args = baseline(&[("batch_size", ArgValue::from(32))]);

        assert!(matches!(
            load_yaml(file.path(), &cli_args, true),
            Err(ArgsError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let cli_args = baseline(&[("batch_size", ArgValue::from(32))]);

        match load_yaml("/nonexistent/dir/args.yaml", &cli_args, true) {
            Err(ArgsError::FileNotFound(path)) => {
                assert_eq!(path, Path::new("/nonexistent/dir/args.yaml"))
            }
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml() {
        let file = yaml_file("batch_size: [64\n");
        let cli_args = baseline(&[("batch_size", ArgValue::from(32))]);

        assert!(matches!(
            load_yaml(file.path(), &cli_args, true),
            Err(ArgsError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_file_keeps_baseline() {
        let file = yaml_file("");
        let cli_args = baseline(&[("batch_size", ArgValue::from(32))]);

        let result = load_yaml(file.path(), &cli_args, false).unwrap();
        assert_eq!(result, cli_args);
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let env: HashMap<String, String> = HashMap::new();
        let result = parse_args_str("- a\n- b\n", &env);
        assert!(matches!(result, Err(ArgsError::InvalidDocument(_))));

        let result = parse_args_str("just a string", &env);
        assert!(matches!(result, Err(ArgsError::InvalidDocument(_))));
    }

    #[test]
    fn test_parse_args_str() {
        let mut env = HashMap::new();
        env.insert("RUN".to_string(), "exp7".to_string());

        let args = parse_args_str("name: ${RUN}\ntags: [a, b]\n", &env).unwrap();
        assert_eq!(args["name"], ArgValue::from("exp7"));
        assert_eq!(
            args["tags"],
            ArgValue::from(vec![ArgValue::from("a"), ArgValue::from("b")])
        );
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let env: HashMap<String, String> = HashMap::new();
        let args = parse_args_str(
            "base: &b\n  lr: 0.1\n  name: sgd\nopt:\n  <<: *b\n  name: adam\n",
            &env,
        )
        .unwrap();

        let opt = args["opt"].as_mapping().unwrap();
        assert_eq!(opt.len(), 2);
        assert_eq!(opt["lr"], ArgValue::from(0.1));
        assert_eq!(opt["name"], ArgValue::from("adam"));
        assert!(!opt.contains_key("<<"));
    }

    #[test]
    fn test_top_level_merge_key_passes_unknown_check() {
        let file = yaml_file("shared: &s\n  layers: 12\nmodel:\n  <<: *s\n");
        let cli_args = baseline(&[
            ("shared", ArgValue::from(ArgMap::new())),
            ("model", ArgValue::from(ArgMap::new())),
        ]);

        let result = load_yaml(file.path(), &cli_args, false).unwrap();
        assert_eq!(
            result["model"].as_mapping().unwrap()["layers"],
            ArgValue::from(12)
        );
    }

    #[test]
    fn test_experimental_warning_on_success() {
        start_capture();
        let env: HashMap<String, String> = HashMap::new();
        let file = yaml_file("batch_size: 64\n");
        let cli_args = baseline(&[("batch_size", ArgValue::from(32))]);

        load_yaml_with_env(file.path(), &cli_args, false, &env).unwrap();

        assert_eq!(take_warnings(), vec![EXPERIMENTAL_WARNING.to_string()]);
    }

    #[test]
    fn test_experimental_warning_before_failures() {
        start_capture();
        let env: HashMap<String, String> = HashMap::new();
        let cli_args = baseline(&[("batch_size", ArgValue::from(32))]);

        let result = load_yaml_with_env("/nonexistent/dir/args.yaml", &cli_args, false, &env);
        assert!(matches!(result, Err(ArgsError::FileNotFound(_))));
        assert_eq!(take_warnings(), vec![EXPERIMENTAL_WARNING.to_string()]);

        let file = yaml_file("batch_size: [64\n");
        let result = load_yaml_with_env(file.path(), &cli_args, false, &env);
        assert!(matches!(result, Err(ArgsError::Parse { .. })));
        assert_eq!(take_warnings(), vec![EXPERIMENTAL_WARNING.to_string()]);
    }

    #[test]
    fn test_yaml_1_1_booleans_stay_strings() {
        let file = yaml_file("fp16: yes\n");
        let cli_args = baseline(&[("fp16", ArgValue::from(false))]);

        match load_yaml(file.path(), &cli_args, true) {
            Err(ArgsError::TypeMismatch {
                key,
                expected,
                found,
            }) => {
                assert_eq!(key, "fp16");
                assert_eq!(expected, crate::core::value::ArgKind::Bool);
                assert_eq!(found, crate::core::value::ArgKind::String);
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }

        let file = yaml_file("fp16: true\n");
        let result = load_yaml(file.path(), &cli_args, true).unwrap();
        assert_eq!(result["fp16"], ArgValue::from(true));
    }
}
