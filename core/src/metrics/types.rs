use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record per task run.
///
/// `end_time` and `duration` stay empty until the task completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    pub task_id: String,
    pub agent_id: String,
    pub provider_name: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_tokens: Option<u64>,
    pub response_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub source_file: PathBuf,
    pub output_file: PathBuf,
}

impl TaskMetrics {
    pub fn tokens_used(&self) -> u64 {
        self.prompt_tokens.unwrap_or(0) + self.response_tokens.unwrap_or(0)
    }
}

/// Rolling aggregate over every completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemMetrics {
    pub total_tasks: u64,
    pub successful_tasks: u64,
    pub failed_tasks: u64,
    /// Running mean in milliseconds.
    pub average_duration: f64,
    pub total_tokens_used: u64,
    pub provider_usage: BTreeMap<String, u64>,
    pub agent_usage: BTreeMap<String, u64>,
    pub last_updated: DateTime<Utc>,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            total_tasks: 0,
            successful_tasks: 0,
            failed_tasks: 0,
            average_duration: 0.0,
            total_tokens_used: 0,
            provider_usage: BTreeMap::new(),
            agent_usage: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }
}

impl SystemMetrics {
    /// Fold one completed task into the aggregate.
    ///
    /// The average is updated incrementally: `(avg * (n - 1) + d) / n`.
    pub fn record(&mut self, task: &TaskMetrics, now: DateTime<Utc>) {
        self.total_tasks += 1;
        if task.success {
            self.successful_tasks += 1;
        } else {
            self.failed_tasks += 1;
        }

        if let Some(d) = task.duration {
            let n = self.total_tasks as f64;
            self.average_duration = (self.average_duration * (n - 1.0) + d as f64) / n;
        }

        self.total_tokens_used += task.tokens_used();

        *self
            .provider_usage
            .entry(task.provider_name.clone())
            .or_insert(0) += 1;
        *self.agent_usage.entry(task.agent_id.clone()).or_insert(0) += 1;

        self.last_updated = now;
    }

    pub fn success_rate(&self) -> Option<f64> {
        (self.total_tasks > 0)
            .then(|| self.successful_tasks as f64 / self.total_tasks as f64 * 100.0)
    }

    pub fn top_provider(&self) -> Option<&str> {
        most_used(&self.provider_usage)
    }

    pub fn top_agent(&self) -> Option<&str> {
        most_used(&self.agent_usage)
    }
}

/// Highest count wins; ties go to the alphabetically first name.
fn most_used(usage: &BTreeMap<String, u64>) -> Option<&str> {
    usage
        .iter()
        .max_by(|(a_name, a), (b_name, b)| a.cmp(b).then_with(|| b_name.cmp(a_name)))
        .map(|(name, _)| name.as_str())
}
