//! JSON Schema validation of task documents.

use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::{SchemaViolation, SmithError};

/// Validate `task` against the schema stored at `schema_path`.
///
/// Every violation is collected before failing; format keywords
/// (`date-time`, `uri`, ...) are enforced.
pub fn validate_task_schema(task: &Value, schema_path: &Path) -> Result<(), SmithError> {
    if !schema_path.exists() {
        return Err(SmithError::not_found(schema_path));
    }
    let raw = std::fs::read_to_string(schema_path)?;
    let schema: Value = serde_json::from_str(&raw).map_err(|e| SmithError::Parse {
        path: schema_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let violations = collect_violations(task, &schema).map_err(|message| SmithError::Parse {
        path: schema_path.to_path_buf(),
        message,
    })?;

    if violations.is_empty() {
        tracing::info!("Task schema validation passed");
        return Ok(());
    }

    for v in &violations {
        tracing::error!(instance_path = %v.instance_path, "{}", v.message);
    }
    tracing::error!(count = violations.len(), "Task validation failed");
    Err(SmithError::SchemaValidation { errors: violations })
}

/// Returns the compile error message if the schema itself is invalid.
fn collect_violations(task: &Value, schema: &Value) -> Result<Vec<SchemaViolation>, String> {
    let compiled = JSONSchema::options()
        .should_validate_formats(true)
        .compile(schema)
        .map_err(|e| format!("invalid schema: {e}"))?;

    let violations = match compiled.validate(task) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|e| {
                let pointer = e.instance_path.to_string();
                SchemaViolation {
                    instance_path: if pointer.is_empty() {
                        "root".to_string()
                    } else {
                        pointer
                    },
                    message: e.to_string(),
                }
            })
            .collect(),
    };
    Ok(violations)
}
