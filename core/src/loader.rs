//! Reads commented-JSON (JSONC) documents: the agent configuration and task files.

use std::path::Path;

use serde_json::Value;

use crate::config::SystemConfig;
use crate::error::SmithError;
use crate::task::TaskDescription;

/// Parse a JSON document that may contain comments and trailing commas.
pub fn read_jsonc(path: &Path) -> Result<Value, SmithError> {
    let result = read_jsonc_inner(path);
    if let Err(e) = &result {
        tracing::error!(path = %path.display(), error = %e, "Error reading JSONC file");
    }
    result
}

fn read_jsonc_inner(path: &Path) -> Result<Value, SmithError> {
    if !path.exists() {
        return Err(SmithError::not_found(path));
    }
    let content = std::fs::read_to_string(path)?;
    parse_jsonc(&content).map_err(|message| SmithError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_jsonc(content: &str) -> Result<Value, String> {
    if content.trim().is_empty() {
        return Err("document is empty".to_string());
    }
    json5::from_str::<Value>(content).map_err(|e| e.to_string())
}

/// Convert a config value that already passed setup validation.
pub fn system_config_from_value(value: Value) -> Result<SystemConfig, SmithError> {
    serde_json::from_value(value)
        .map_err(|e| SmithError::Config(format!("invalid agent configuration: {e}")))
}

/// Convert a task value that already passed schema validation.
pub fn task_from_value(path: &Path, value: Value) -> Result<TaskDescription, SmithError> {
    serde_json::from_value(value).map_err(|e| SmithError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
