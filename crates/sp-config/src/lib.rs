//! sp-config: hierarchical key/value parameter store.
//!
//! Parameters are string-keyed (`particles.fuel_species`) and hold zero or more
//! raw string values. Typed access, required/optional semantics and namespace
//! views live on the [`ConfigSource`] trait; [`ParamTable`] is the in-memory
//! store, filled from AMReX-style `inputs` text, YAML or JSON.

pub mod source;
pub mod table;

pub use source::{ConfigSource, FromParam, Prefixed};
pub use table::ParamTable;

use std::path::{Path, PathBuf};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Missing required parameter: {key}")]
    Missing { key: String },

    #[error("Cannot parse '{value}' for {key} as {expected}")]
    Parse {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("Unsupported value for {key}: {reason}")]
    Unsupported { key: String, reason: String },

    #[error("Failed to read parameter file {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load an AMReX-style `inputs` file.
pub fn load_inputs(path: &Path) -> ConfigResult<ParamTable> {
    ParamTable::from_inputs_str(&read_file(path)?)
}

pub fn load_yaml(path: &Path) -> ConfigResult<ParamTable> {
    ParamTable::from_yaml_str(&read_file(path)?)
}

pub fn load_json(path: &Path) -> ConfigResult<ParamTable> {
    ParamTable::from_json_str(&read_file(path)?)
}

/// Load a parameter file, picking the format from the extension.
///
/// `.yaml`/`.yml` and `.json` are structured formats; anything else is read as
/// `inputs` text.
pub fn load_path(path: &Path) -> ConfigResult<ParamTable> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => load_inputs(path),
    }
}
