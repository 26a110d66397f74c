use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application settings (`smith.toml`): where the workspace lives and how to log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a daily rolling file under `directory`.
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "smith_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Directory for log files. Defaults to `logs` under the workspace.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Locations of the workspace documents. Relative paths resolve against
/// `workspace_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: PathBuf,

    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,

    #[serde(default = "default_schema_file")]
    pub schema_file: PathBuf,

    #[serde(default = "default_task_file")]
    pub task_file: PathBuf,

    #[serde(default = "default_metrics_dir")]
    pub metrics_dir: PathBuf,
}

fn default_workspace_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_config_file() -> PathBuf {
    PathBuf::from("config/agent.config.jsonc")
}

fn default_schema_file() -> PathBuf {
    PathBuf::from("schemas/task.schema.json")
}

fn default_task_file() -> PathBuf {
    PathBuf::from("tasks/task-001.jsonc")
}

fn default_metrics_dir() -> PathBuf {
    PathBuf::from("logs/metrics")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            workspace_dir: default_workspace_dir(),
            config_file: default_config_file(),
            schema_file: default_schema_file(),
            task_file: default_task_file(),
            metrics_dir: default_metrics_dir(),
        }
    }
}

impl PathsConfig {
    pub fn resolve(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_dir.join(path)
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.resolve(&self.config_file)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.resolve(&self.schema_file)
    }

    pub fn task_path(&self) -> PathBuf {
        self.resolve(&self.task_file)
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.resolve(&self.metrics_dir)
    }
}

/// The agent configuration document (`agent.config.jsonc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub default_engine: String,

    pub providers: BTreeMap<String, ProviderConfig>,

    pub agents: BTreeMap<String, AgentConfig>,

    /// Minimum `smith` version this workspace expects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub model: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    #[serde(default)]
    pub enabled: bool,

    pub prompt_file: PathBuf,

    /// Provider override; falls back to `SystemConfig::default_engine`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}

/// Canonical form of a provider name: trimmed and lower-cased.
pub fn normalize_provider_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl SystemConfig {
    /// Provider key an agent runs on, normalized.
    pub fn engine_for(&self, agent: &AgentConfig) -> String {
        let engine = agent
            .engine
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.default_engine);
        normalize_provider_name(engine)
    }

    /// Provider entry whose key matches `name` case-insensitively.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        let wanted = normalize_provider_name(name);
        self.providers
            .iter()
            .find(|(key, _)| normalize_provider_name(key) == wanted)
            .map(|(_, cfg)| cfg)
    }
}
