use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One declarative unit of work: an agent, a source input and a destination output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescription {
    pub agent: String,

    /// Relative to the project root.
    pub source_file: PathBuf,

    /// Relative to the project root.
    pub output_file: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

impl TaskDescription {
    pub fn source_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.source_file)
    }

    pub fn output_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output_file)
    }
}
