use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::dispatch::{DispatchError, ProviderInitError};

/// One JSON Schema violation reported against a task document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer into the task document, `"root"` for the document itself.
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.instance_path, self.message)
    }
}

fn join_violations(errors: &[SchemaViolation]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum SmithError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("task validation failed: {}", join_violations(.errors))]
    SchemaValidation { errors: Vec<SchemaViolation> },

    #[error("configuration validation failed with {} error(s)", .errors.len())]
    SetupInvalid { errors: Vec<String> },

    #[error("config error: {0}")]
    Config(String),

    #[error("unknown LLM provider \"{name}\", available providers: {}", .available.join(", "))]
    UnknownProvider { name: String, available: Vec<String> },

    #[error("failed to initialize LLM provider \"{name}\": {source}")]
    ProviderInit {
        name: String,
        #[source]
        source: ProviderInitError,
    },

    #[error("agent \"{0}\" is not defined in configuration")]
    AgentNotFound(String),

    #[error("agent \"{0}\" is not enabled in configuration")]
    AgentDisabled(String),

    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SmithError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Process exit status for this error.
    ///
    /// - 10: setup, schema or agent validation failure
    /// - 11: config error / unknown provider
    /// - 12: missing or unparseable file
    /// - 20: provider construction or dispatch failure
    /// - 30: I/O
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SetupInvalid { .. }
            | Self::SchemaValidation { .. }
            | Self::AgentNotFound(_)
            | Self::AgentDisabled(_) => 10,
            Self::Config(_) | Self::UnknownProvider { .. } => 11,
            Self::NotFound { .. } | Self::Parse { .. } => 12,
            Self::ProviderInit { .. } | Self::Dispatch(_) => 20,
            Self::Io(_) => 30,
        }
    }
}
