//! Workspace scaffolding for `smith init`.
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::commands::cli::InitArgs;

const DIRECTORIES: &[&str] = &[
    "config",
    "agents/code-architect",
    "tasks",
    "schemas",
    "logs",
    "outputs",
];

const AGENT_CONFIG: &str = r#"{
  // Provider used by agents that do not set "engine".
  "defaultEngine": "openai",
  "providers": {
    "openai": {
      "apiKeyEnv": "OPENAI_API_KEY",
      "model": "gpt-4o",
      "endpoint": "https://api.openai.com/v1/chat/completions"
    }
  },
  "agents": {
    "codeArchitect": {
      "enabled": true,
      "promptFile": "agents/code-architect/prompt.md"
    }
  }
}
"#;

const TASK_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Smith task",
  "type": "object",
  "required": ["agent", "sourceFile", "outputFile"],
  "properties": {
    "agent": { "type": "string", "minLength": 1 },
    "objective": { "type": "string" },
    "sourceFile": { "type": "string", "minLength": 1 },
    "outputFile": { "type": "string", "minLength": 1 },
    "context": { "type": "string" },
    "constraints": { "type": "array", "items": { "type": "string" } }
  }
}
"#;

const EXAMPLE_TASK: &str = r#"{
  "agent": "codeArchitect",
  "objective": "Example task objective",
  "sourceFile": "src/example.ts",
  "outputFile": "src/example.improved.ts",
  "constraints": ["Maintain functionality"],
  "context": "Example context"
}
"#;

const AGENT_PROMPT: &str = "You are a senior software architect.
Review the source code below and return an improved version that keeps its
behaviour, splits oversized functions, and names things clearly.
Return only the rewritten file.
";

const TEMPLATES: &[(&str, &str, &str)] = &[
    ("config/agent.config.jsonc", AGENT_CONFIG, "Agent configuration"),
    ("schemas/task.schema.json", TASK_SCHEMA, "Task schema"),
    ("tasks/task-001.jsonc", EXAMPLE_TASK, "Example task"),
    ("agents/code-architect/prompt.md", AGENT_PROMPT, "Agent prompt"),
];

/// Create the workspace layout under `args.directory`, never overwriting files.
pub fn handle_init(args: &InitArgs) -> anyhow::Result<PathBuf> {
    let target = absolute(&args.directory)?;
    tracing::info!(directory = %target.display(), "Initializing Smith workspace");

    for dir in DIRECTORIES {
        let full = target.join(dir);
        if !full.exists() {
            std::fs::create_dir_all(&full)
                .with_context(|| format!("failed to create directory {}", full.display()))?;
            tracing::info!("Created directory: {dir}");
        }
    }

    for (rel, content, desc) in TEMPLATES {
        let full = target.join(rel);
        if full.exists() {
            tracing::debug!("Keeping existing {rel}");
            continue;
        }
        std::fs::write(&full, content)
            .with_context(|| format!("failed to write {}", full.display()))?;
        tracing::info!("Created {desc}: {rel}");
    }

    println!("Smith workspace initialized in {}", target.display());
    println!("Next steps:");
    println!("  1. Export the API key named by each provider's apiKeyEnv");
    println!("  2. Adjust agents/code-architect/prompt.md");
    println!("  3. Describe your task in tasks/task-001.jsonc");
    println!("  4. Run: smith run -p /path/to/your/project");
    Ok(target)
}

fn absolute(dir: &Path) -> anyhow::Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(cwd.join(dir))
}
