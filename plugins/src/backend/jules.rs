use async_trait::async_trait;
use smith_core::api::{DispatchError, Generation, LlmProvider, ProviderConfig, ProviderInitError};

use super::http::read_secret;

/// Registered so configurations can name it; generation is not wired up yet.
pub struct JulesProvider {
    model: String,
}

impl JulesProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderInitError> {
        read_secret(&config.api_key_env)?;
        Ok(Self {
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for JulesProvider {
    fn name(&self) -> &str {
        "jules"
    }

    async fn generate_response(&self, prompt: &str) -> Result<Generation, DispatchError> {
        tracing::warn!(
            provider = "jules",
            model = %self.model,
            prompt_len = prompt.len(),
            "Jules provider cannot generate responses"
        );
        Err(DispatchError::NotImplemented {
            provider: "jules".to_string(),
        })
    }
}
