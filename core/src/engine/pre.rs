//! Pre-dispatch stages: load and validate documents, resolve the agent and provider.
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{AgentConfig, PathsConfig, ProviderConfig, SystemConfig};
use crate::error::SmithError;
use crate::loader::{read_jsonc, system_config_from_value, task_from_value};
use crate::task::TaskDescription;
use crate::validate::{validate_setup, validate_task_schema};

pub(crate) fn load_config(paths: &PathsConfig) -> Result<Value, SmithError> {
    read_jsonc(&paths.config_path())
}

pub(crate) fn validate_config(value: Value, paths: &PathsConfig) -> Result<SystemConfig, SmithError> {
    let report = validate_setup(&value, &paths.workspace_dir);
    if !report.is_valid() {
        return Err(SmithError::SetupInvalid {
            errors: report.errors(),
        });
    }
    system_config_from_value(value)
}

pub(crate) fn load_task(path: &Path) -> Result<Value, SmithError> {
    read_jsonc(path)
}

pub(crate) fn validate_task(
    value: Value,
    task_path: &Path,
    paths: &PathsConfig,
) -> Result<TaskDescription, SmithError> {
    validate_task_schema(&value, &paths.schema_path())?;
    task_from_value(task_path, value)
}

/// An enabled agent with every file the run reads or writes resolved.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedAgent {
    pub agent_id: String,
    pub agent: AgentConfig,
    pub prompt_path: PathBuf,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
}

pub(crate) fn resolve_agent(
    config: &SystemConfig,
    task: &TaskDescription,
    paths: &PathsConfig,
    project_root: &Path,
) -> Result<ResolvedAgent, SmithError> {
    let agent_id = task.agent.clone();
    let agent = config
        .agents
        .get(&agent_id)
        .ok_or_else(|| SmithError::AgentNotFound(agent_id.clone()))?;
    if !agent.enabled {
        return Err(SmithError::AgentDisabled(agent_id));
    }

    let prompt_path = paths.resolve(&agent.prompt_file);
    if !prompt_path.is_file() {
        tracing::error!(path = %prompt_path.display(), "Prompt file not found");
        return Err(SmithError::not_found(prompt_path));
    }

    let source_path = task.source_path(project_root);
    if !source_path.is_file() {
        tracing::error!(path = %source_path.display(), "Source file not found");
        return Err(SmithError::not_found(source_path));
    }

    Ok(ResolvedAgent {
        agent_id,
        agent: agent.clone(),
        prompt_path,
        source_path,
        output_path: task.output_path(project_root),
    })
}

/// Provider key (lower-cased) and its configuration for `agent`.
pub(crate) fn resolve_provider(
    config: &SystemConfig,
    agent: &AgentConfig,
) -> Result<(String, ProviderConfig), SmithError> {
    let name = config.engine_for(agent);
    let provider = config
        .provider(&name)
        .cloned()
        .ok_or_else(|| SmithError::Config(format!("Provider configuration not found: {name}")))?;
    Ok((name, provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn system_config() -> SystemConfig {
        let mut providers = BTreeMap::new();
        providers.insert(
            "openai".to_string(),
            ProviderConfig {
                api_key_env: "OPENAI_API_KEY".into(),
                model: "gpt-4o".into(),
                endpoint: "https://api.openai.com/v1/chat/completions".into(),
            },
        );
        let mut agents = BTreeMap::new();
        agents.insert(
            "codeArchitect".to_string(),
            AgentConfig {
                enabled: true,
                prompt_file: PathBuf::from("agents/code-architect/prompt.md"),
                engine: None,
            },
        );
        agents.insert(
            "sleeper".to_string(),
            AgentConfig {
                enabled: false,
                prompt_file: PathBuf::from("agents/code-architect/prompt.md"),
                engine: None,
            },
        );
        agents.insert(
            "geminiFan".to_string(),
            AgentConfig {
                enabled: true,
                prompt_file: PathBuf::from("agents/code-architect/prompt.md"),
                engine: Some("Gemini".into()),
            },
        );
        SystemConfig {
            default_engine: "OpenAI".into(),
            providers,
            agents,
            min_version: None,
        }
    }

    fn task(agent: &str) -> TaskDescription {
        TaskDescription {
            agent: agent.into(),
            source_file: PathBuf::from("src/a.ts"),
            output_file: PathBuf::from("out/a.out.ts"),
            context: None,
            constraints: vec![],
        }
    }

    fn fixture() -> (TempDir, PathsConfig, PathBuf) {
        let dir = TempDir::new().unwrap();
        let ws = dir.path().join("ws");
        let project = dir.path().join("project");
        std::fs::create_dir_all(ws.join("agents/code-architect")).unwrap();
        std::fs::write(ws.join("agents/code-architect/prompt.md"), "Refactor.").unwrap();
        std::fs::create_dir_all(project.join("src")).unwrap();
        std::fs::write(project.join("src/a.ts"), "export const a = 1;").unwrap();
        let paths = PathsConfig {
            workspace_dir: ws,
            ..PathsConfig::default()
        };
        (dir, paths, project)
    }

    #[test]
    fn test_resolve_enabled_agent() {
        let (_dir, paths, project) = fixture();
        let resolved = resolve_agent(&system_config(), &task("codeArchitect"), &paths, &project)
            .unwrap();
        assert_eq!(resolved.source_path, project.join("src/a.ts"));
        assert_eq!(resolved.output_path, project.join("out/a.out.ts"));
    }

    #[test]
    fn test_disabled_agent_is_rejected() {
        let (_dir, paths, project) = fixture();
        let err = resolve_agent(&system_config(), &task("sleeper"), &paths, &project).unwrap_err();
        assert!(matches!(err, SmithError::AgentDisabled(name) if name == "sleeper"));
    }

    #[test]
    fn test_unknown_agent_is_rejected() {
        let (_dir, paths, project) = fixture();
        let err = resolve_agent(&system_config(), &task("ghost"), &paths, &project).unwrap_err();
        assert!(matches!(err, SmithError::AgentNotFound(_)));
    }

    #[test]
    fn test_missing_source_file() {
        let (_dir, paths, project) = fixture();
        std::fs::remove_file(project.join("src/a.ts")).unwrap();
        let err = resolve_agent(&system_config(), &task("codeArchitect"), &paths, &project)
            .unwrap_err();
        match err {
            SmithError::NotFound { path } => assert_eq!(path, project.join("src/a.ts")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_provider_falls_back_to_default_engine_lowercased() {
        let cfg = system_config();
        let (name, provider) = resolve_provider(&cfg, &cfg.agents["codeArchitect"]).unwrap();
        assert_eq!(name, "openai");
        assert_eq!(provider.model, "gpt-4o");
    }

    #[test]
    fn test_provider_keys_match_case_insensitively() {
        let mut cfg = system_config();
        let openai = cfg.providers.remove("openai").unwrap();
        cfg.providers.insert("OpenAI".to_string(), openai);
        let (name, provider) = resolve_provider(&cfg, &cfg.agents["codeArchitect"]).unwrap();
        assert_eq!(name, "openai");
        assert_eq!(provider.model, "gpt-4o");
    }

    #[test]
    fn test_provider_override_without_config_is_fatal() {
        let cfg = system_config();
        let err = resolve_provider(&cfg, &cfg.agents["geminiFan"]).unwrap_err();
        assert!(err.to_string().contains("Provider configuration not found: gemini"));
    }
}
