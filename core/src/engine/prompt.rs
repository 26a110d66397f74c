use std::path::Path;

const NO_CONTEXT: &str = "(no additional context)";

/// Build the fixed prompt sent to the provider.
pub fn assemble_prompt(
    agent_id: &str,
    context: Option<&str>,
    template: &str,
    source_path: &Path,
    source: &str,
) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_CONTEXT);
    let lang = source_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    format!(
        "=== PROJECT CONTEXT ===
{context}

=== INSTRUCTIONS FOR AGENT \"{agent_id}\" ===
{template}

=== SOURCE CODE ===
```{lang}
{source}
```
"
    )
}
