//! Environment and configuration checks that gate every task run.

use std::path::Path;

use serde_json::Value;

use crate::config::normalize_provider_name;

/// Directories a workspace must contain.
pub const REQUIRED_DIRS: [&str; 4] = ["config", "agents", "tasks", "schemas"];

const REQUIRED_SECTIONS: [&str; 3] = ["defaultEngine", "providers", "agents"];
const REQUIRED_PROVIDER_PROPS: [&str; 3] = ["apiKeyEnv", "model", "endpoint"];

/// Version of the running binary, compared against the config's `minVersion`.
pub const SMITH_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Combined verdict of the environment and config checks.
#[derive(Debug, Clone, Default)]
pub struct SetupReport {
    pub environment: ValidationResult,
    pub config: ValidationResult,
}

impl SetupReport {
    pub fn is_valid(&self) -> bool {
        self.environment.is_valid() && self.config.is_valid()
    }

    pub fn errors(&self) -> Vec<String> {
        self.environment
            .errors
            .iter()
            .chain(self.config.errors.iter())
            .cloned()
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.environment
            .warnings
            .iter()
            .chain(self.config.warnings.iter())
            .cloned()
            .collect()
    }
}

/// Version requirement and required workspace directories.
pub fn validate_environment(workspace_dir: &Path, min_version: Option<&str>) -> ValidationResult {
    let mut result = ValidationResult::default();

    if let Some(min) = min_version {
        if let Err(msg) = check_version(SMITH_VERSION, min) {
            result.error(msg);
        }
    }

    for dir in REQUIRED_DIRS {
        if !workspace_dir.join(dir).is_dir() {
            result.error(format!("Required directory not found: {dir}"));
        }
    }

    result
}

fn check_version(current: &str, min: &str) -> Result<(), String> {
    let min_v = semver::Version::parse(min.trim())
        .map_err(|e| format!("Invalid minVersion \"{min}\": {e}"))?;
    let current_v = semver::Version::parse(current)
        .map_err(|e| format!("Invalid smith version \"{current}\": {e}"))?;
    if current_v < min_v {
        return Err(format!(
            "smith version {current} is not supported. Minimum required: {min_v}"
        ));
    }
    Ok(())
}

/// Structural checks on the raw agent configuration document.
pub fn validate_agent_config(config: &Value, workspace_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    for prop in REQUIRED_SECTIONS {
        if !is_truthy(config.get(prop)) {
            result.error(format!("Missing required property: {prop}"));
        }
    }

    let providers = config.get("providers").and_then(Value::as_object);
    if let Some(providers) = providers {
        for (name, provider) in providers {
            result.merge(validate_provider(name, provider));
        }
    }

    if let Some(agents) = config.get("agents").and_then(Value::as_object) {
        for (name, agent) in agents {
            result.merge(validate_agent(name, agent, workspace_dir));
        }
    }

    if let (Some(engine), Some(providers)) = (
        config.get("defaultEngine").and_then(Value::as_str),
        providers,
    ) {
        let wanted = normalize_provider_name(engine);
        let known = providers
            .keys()
            .any(|key| normalize_provider_name(key) == wanted);
        if !wanted.is_empty() && !known {
            result.error(format!(
                "Default engine \"{engine}\" not found in providers"
            ));
        }
    }

    result
}

fn validate_provider(name: &str, provider: &Value) -> ValidationResult {
    let mut result = ValidationResult::default();

    for prop in REQUIRED_PROVIDER_PROPS {
        if !is_truthy(provider.get(prop)) {
            result.error(format!(
                "Provider \"{name}\": Missing required property \"{prop}\""
            ));
        }
    }

    if let Some(env) = provider.get("apiKeyEnv").and_then(Value::as_str) {
        let set = std::env::var(env).map(|v| !v.is_empty()).unwrap_or(false);
        if !env.is_empty() && !set {
            result.warn(format!(
                "Provider \"{name}\": Environment variable \"{env}\" not set"
            ));
        }
    }

    if let Some(endpoint) = provider.get("endpoint").filter(|v| is_truthy(Some(v))) {
        let valid = endpoint
            .as_str()
            .map(|s| url::Url::parse(s).is_ok())
            .unwrap_or(false);
        if !valid {
            result.error(format!("Provider \"{name}\": Invalid endpoint URL format"));
        }
    }

    result
}

fn validate_agent(name: &str, agent: &Value, workspace_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    match agent.get("promptFile").and_then(Value::as_str) {
        Some(prompt) if !prompt.is_empty() => {
            if !workspace_dir.join(prompt).is_file() {
                result.error(format!(
                    "Agent \"{name}\": Prompt file not found: {prompt}"
                ));
            }
        }
        _ => result.error(format!("Agent \"{name}\": Missing promptFile property")),
    }

    if agent.get("enabled") == Some(&Value::Bool(false)) {
        result.warn(format!("Agent \"{name}\": Currently disabled"));
    }

    result
}

/// JavaScript-style truthiness, used for "is this property present" checks.
fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Run both checks, log every finding, and return the combined report.
pub fn validate_setup(config: &Value, workspace_dir: &Path) -> SetupReport {
    tracing::info!("Validating configuration and environment...");

    let min_version = config.get("minVersion").and_then(Value::as_str);
    let report = SetupReport {
        environment: validate_environment(workspace_dir, min_version),
        config: validate_agent_config(config, workspace_dir),
    };

    for e in report.errors() {
        tracing::error!("{e}");
    }
    for w in report.warnings() {
        tracing::warn!("{w}");
    }

    if report.is_valid() {
        tracing::info!("Configuration validation passed");
    } else {
        tracing::error!("Configuration validation failed");
    }

    report
}
