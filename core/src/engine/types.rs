use std::path::PathBuf;

use crate::provider::TokenUsage;

/// What the driver does when a backend fails to generate a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Propagate the dispatch error and fail the run.
    #[default]
    Fail,
    /// Log the error and write the degraded sentinel text as the response.
    Degrade,
}

/// Inputs of one task run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Codebase the task's source/output paths resolve against.
    pub project_root: PathBuf,
    /// Task document; defaults to the configured task file.
    pub task_path: Option<PathBuf>,
    pub dispatch_policy: DispatchPolicy,
}

impl RunRequest {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            task_path: None,
            dispatch_policy: DispatchPolicy::default(),
        }
    }

    pub fn with_task(mut self, task_path: impl Into<PathBuf>) -> Self {
        self.task_path = Some(task_path.into());
        self
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub task_id: String,
    pub agent_id: String,
    pub provider_name: String,
    pub output_path: PathBuf,
    pub response_length: usize,
    pub usage: Option<TokenUsage>,
    /// True when the response is the degraded sentinel.
    pub degraded: bool,
}
