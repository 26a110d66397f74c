//! Name → backend resolution over the closed set of known providers.
use smith_core::api::{LlmProvider, ProviderConfig, ProviderFactory, ProviderInitError, SmithError};

use crate::backend::{GeminiProvider, JulesProvider, OpenAiProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Jules,
}

/// Registration table, in listing order.
const REGISTERED: &[(&str, ProviderKind)] = &[
    ("openai", ProviderKind::OpenAi),
    ("gemini", ProviderKind::Gemini),
    ("jules", ProviderKind::Jules),
];

impl ProviderKind {
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        REGISTERED
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, kind)| *kind)
    }

    fn build(self, config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, ProviderInitError> {
        let provider: Box<dyn LlmProvider> = match self {
            Self::OpenAi => Box::new(OpenAiProvider::new(config)?),
            Self::Gemini => Box::new(GeminiProvider::new(config)?),
            Self::Jules => Box::new(JulesProvider::new(config)?),
        };
        Ok(provider)
    }
}

fn check_config(config: &ProviderConfig) -> Result<(), SmithError> {
    let props = [
        ("apiKeyEnv", &config.api_key_env),
        ("model", &config.model),
        ("endpoint", &config.endpoint),
    ];
    for (prop, value) in props {
        if value.trim().is_empty() {
            return Err(SmithError::Config(format!(
                "Missing required config property: {prop}"
            )));
        }
    }
    Ok(())
}

/// The built-in provider factory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProviderRegistry;

impl ProviderRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderFactory for ProviderRegistry {
    fn resolve(
        &self,
        name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, SmithError> {
        if name.trim().is_empty() {
            return Err(SmithError::Config(
                "Provider name must be a non-empty string".to_string(),
            ));
        }
        check_config(config)?;

        let normalized = name.trim().to_lowercase();
        let Some(kind) = ProviderKind::lookup(&normalized) else {
            return Err(SmithError::UnknownProvider {
                name: name.to_string(),
                available: self.list_available(),
            });
        };

        let provider = kind.build(config).map_err(|source| SmithError::ProviderInit {
            name: normalized.clone(),
            source,
        })?;
        tracing::debug!(provider = %normalized, model = %config.model, "Provider initialized");
        Ok(provider)
    }

    fn list_available(&self) -> Vec<String> {
        REGISTERED.iter().map(|(n, _)| n.to_string()).collect()
    }
}
