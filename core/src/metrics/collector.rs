use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use super::report::render_report;
use super::types::{SystemMetrics, TaskMetrics};
use crate::error::SmithError;

pub const SYSTEM_METRICS_FILE: &str = "system-metrics.json";

/// Tracks at most one in-flight task and persists completed ones.
#[derive(Debug)]
pub struct MetricsCollector {
    dir: PathBuf,
    current: Option<TaskMetrics>,
}

impl MetricsCollector {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SmithError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, current: None })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_tracking(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_task(&self) -> Option<&TaskMetrics> {
        self.current.as_ref()
    }

    /// Open a new in-flight record, replacing any previous one.
    pub fn start_task(
        &mut self,
        task_id: &str,
        agent_id: &str,
        provider_name: &str,
        source_file: &Path,
        output_file: &Path,
    ) {
        if let Some(prev) = &self.current {
            tracing::warn!(task_id = %prev.task_id, "Discarding unfinished task record");
        }
        self.current = Some(TaskMetrics {
            task_id: task_id.to_string(),
            agent_id: agent_id.to_string(),
            provider_name: provider_name.to_string(),
            start_time: Utc::now(),
            end_time: None,
            duration: None,
            success: false,
            prompt_tokens: None,
            response_tokens: None,
            response_length: 0,
            error_message: None,
            source_file: source_file.to_path_buf(),
            output_file: output_file.to_path_buf(),
        });
        tracing::debug!(task_id, agent_id, provider_name, "Started tracking task");
    }

    /// Attach token counts to the in-flight record, if any.
    pub fn update_token_usage(
        &mut self,
        prompt_tokens: Option<u64>,
        response_tokens: Option<u64>,
    ) {
        if let Some(task) = self.current.as_mut() {
            task.prompt_tokens = prompt_tokens;
            task.response_tokens = response_tokens;
        }
    }

    /// Close the in-flight record and persist it.
    ///
    /// Without an in-flight task this only logs a warning and returns `Ok(None)`.
    /// The aggregate is written before the day log; if either write fails the
    /// task stays in flight so the caller can still record it as failed.
    pub fn complete_task(
        &mut self,
        success: bool,
        response_length: usize,
        error_message: Option<String>,
    ) -> Result<Option<TaskMetrics>, SmithError> {
        let Some(mut task) = self.current.clone() else {
            tracing::warn!("No active task to complete");
            return Ok(None);
        };

        let end = Utc::now();
        task.end_time = Some(end);
        task.duration = Some((end - task.start_time).num_milliseconds().max(0) as u64);
        task.success = success;
        task.response_length = response_length;
        task.error_message = error_message;

        self.update_system_metrics(&task)?;
        self.append_task(&task, end.date_naive())?;
        self.current = None;

        tracing::info!(
            task_id = %task.task_id,
            success,
            duration_ms = task.duration.unwrap_or(0),
            "Task completed"
        );
        Ok(Some(task))
    }

    fn tasks_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("tasks-{}.json", date.format("%Y-%m-%d")))
    }

    fn system_path(&self) -> PathBuf {
        self.dir.join(SYSTEM_METRICS_FILE)
    }

    fn append_task(&self, task: &TaskMetrics, date: NaiveDate) -> Result<(), SmithError> {
        let path = self.tasks_path(date);
        let mut tasks: Vec<TaskMetrics> = Vec::new();
        if path.exists() {
            match read_json(&path) {
                Ok(existing) => tasks = existing,
                Err(e) => tracing::warn!(error = %e, "Failed to read existing task metrics"),
            }
        }
        tasks.push(task.clone());
        write_json(&path, &tasks)
    }

    fn update_system_metrics(&self, task: &TaskMetrics) -> Result<(), SmithError> {
        let path = self.system_path();
        let mut system = SystemMetrics::default();
        if path.exists() {
            match read_json::<SystemMetrics>(&path) {
                Ok(existing) => system = existing,
                Err(e) => tracing::warn!(error = %e, "Failed to read system metrics"),
            }
        }
        system.record(task, Utc::now());
        write_json(&path, &system)
    }

    /// The persisted aggregate, or `None` if nothing was recorded yet.
    pub fn system_metrics(&self) -> Option<SystemMetrics> {
        let path = self.system_path();
        if !path.exists() {
            return None;
        }
        match read_json(&path) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read system metrics");
                None
            }
        }
    }

    /// Records completed on `date` (UTC), in completion order.
    pub fn task_metrics(&self, date: NaiveDate) -> Vec<TaskMetrics> {
        let path = self.tasks_path(date);
        if !path.exists() {
            return Vec::new();
        }
        read_json(&path).unwrap_or_else(|e| {
            tracing::error!(%date, error = %e, "Failed to read task metrics");
            Vec::new()
        })
    }

    pub fn generate_report(&self) -> String {
        render_report(self.system_metrics().as_ref())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), SmithError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| SmithError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    std::fs::write(path, json)?;
    Ok(())
}
