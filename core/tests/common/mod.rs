#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use smith_core::api::{
    AppConfig, DispatchError, Generation, LlmProvider, PathsConfig, ProviderConfig,
    ProviderFactory, ProviderInitError, RunContext, SmithError,
};
use tempfile::TempDir;

pub const SOURCE: &str = "export function add(a: number, b: number) { return a + b; }\n";

pub const TASK_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "required": ["agent", "sourceFile", "outputFile"],
  "properties": {
    "agent": { "type": "string", "minLength": 1 },
    "sourceFile": { "type": "string" },
    "outputFile": { "type": "string" },
    "context": { "type": "string" },
    "constraints": { "type": "array", "items": { "type": "string" } }
  }
}"#;

pub const AGENT_CONFIG: &str = r#"{
  // providers reachable from this workspace
  "defaultEngine": "OpenAI",
  "providers": {
    "openai": {
      "apiKeyEnv": "SMITH_TEST_OPENAI_KEY",
      "model": "gpt-4o",
      "endpoint": "https://api.openai.com/v1/chat/completions",
    },
  },
  "agents": {
    "codeArchitect": { "enabled": true, "promptFile": "agents/code-architect/prompt.md" },
    "retired": { "enabled": false, "promptFile": "agents/code-architect/prompt.md" },
  },
}"#;

pub const DEFAULT_TASK: &str = r#"{
  "agent": "codeArchitect",
  "sourceFile": "src/math.ts",
  "outputFile": "out/math.refactored.ts",
  "context": "Arithmetic helpers",
}"#;

/// A workspace plus a project root laid out on disk.
pub struct Fixture {
    _dir: TempDir,
    pub workspace: PathBuf,
    pub project: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().join("workspace");
        let project = dir.path().join("project");
        for sub in ["config", "agents/code-architect", "tasks", "schemas"] {
            std::fs::create_dir_all(workspace.join(sub)).unwrap();
        }
        std::fs::create_dir_all(project.join("src")).unwrap();

        std::fs::write(workspace.join("config/agent.config.jsonc"), AGENT_CONFIG).unwrap();
        std::fs::write(workspace.join("schemas/task.schema.json"), TASK_SCHEMA).unwrap();
        std::fs::write(
            workspace.join("agents/code-architect/prompt.md"),
            "Split the module into smaller units.",
        )
        .unwrap();
        std::fs::write(project.join("src/math.ts"), SOURCE).unwrap();

        let fixture = Self {
            _dir: dir,
            workspace,
            project,
        };
        fixture.write_task(DEFAULT_TASK);
        fixture
    }

    pub fn write_task(&self, body: &str) {
        std::fs::write(self.workspace.join("tasks/task-001.jsonc"), body).unwrap();
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            paths: PathsConfig {
                workspace_dir: self.workspace.clone(),
                ..PathsConfig::default()
            },
            ..AppConfig::default()
        }
    }

    pub fn context(&self, factory: Arc<FakeFactory>) -> RunContext {
        RunContext::new(self.app_config(), factory).unwrap()
    }

    pub fn metrics_dir(&self) -> PathBuf {
        self.workspace.join("logs/metrics")
    }

    pub fn output(&self) -> PathBuf {
        self.project.join("out/math.refactored.ts")
    }
}

#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(Generation),
    DispatchFails,
    InitFails,
}

/// Provider factory that hands out a scripted backend and keeps the prompt it saw.
pub struct FakeFactory {
    behavior: Behavior,
    resolved: AtomicUsize,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl FakeFactory {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            resolved: AtomicUsize::new(0),
            last_prompt: Arc::new(Mutex::new(None)),
        })
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl ProviderFactory for FakeFactory {
    fn resolve(
        &self,
        name: &str,
        _config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, SmithError> {
        self.resolved.fetch_add(1, Ordering::SeqCst);
        if let Behavior::InitFails = self.behavior {
            return Err(SmithError::ProviderInit {
                name: name.to_string(),
                source: ProviderInitError::MissingSecret("SMITH_TEST_OPENAI_KEY".into()),
            });
        }
        Ok(Box::new(FakeProvider {
            behavior: self.behavior.clone(),
            last_prompt: self.last_prompt.clone(),
        }))
    }

    fn list_available(&self) -> Vec<String> {
        vec!["openai".to_string()]
    }
}

struct FakeProvider {
    behavior: Behavior,
    last_prompt: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl LlmProvider for FakeProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate_response(&self, prompt: &str) -> Result<Generation, DispatchError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.behavior {
            Behavior::Reply(generation) => Ok(generation.clone()),
            _ => Err(DispatchError::Status {
                url: "https://api.openai.com/v1/chat/completions".into(),
                status: 500,
                body: "upstream exploded".into(),
            }),
        }
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

pub fn day_file(metrics_dir: &Path) -> PathBuf {
    let date = chrono::Utc::now().format("%Y-%m-%d");
    metrics_dir.join(format!("tasks-{date}.json"))
}
