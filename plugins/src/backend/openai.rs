use async_trait::async_trait;
use serde_json::{json, Value};
use smith_core::api::{
    DispatchError, Generation, LlmProvider, ProviderConfig, ProviderInitError, TokenUsage,
};

use super::http::{build_client, post_json, read_secret};
use super::NO_RESPONSE;

const TEMPERATURE: f64 = 0.5;

/// Chat-completions backend.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderInitError> {
        let api_key = read_secret(&config.api_key_env)?;
        Ok(Self {
            http: build_client()?,
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

fn parse_generation(body: &Value) -> Generation {
    let text = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or(NO_RESPONSE)
        .to_string();
    let usage = body.get("usage").map(|u| TokenUsage {
        prompt_tokens: u.get("prompt_tokens").and_then(Value::as_u64),
        response_tokens: u.get("completion_tokens").and_then(Value::as_u64),
    });
    Generation { text, usage }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate_response(&self, prompt: &str) -> Result<Generation, DispatchError> {
        let payload = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": TEMPERATURE,
        });
        tracing::debug!(
            provider = "openai",
            url = %self.endpoint,
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending generation request"
        );
        let req = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key);
        let body = post_json(req, &self.endpoint, &payload).await?;
        let generation = parse_generation(&body);
        tracing::debug!(
            provider = "openai",
            response_len = generation.text.len(),
            usage = ?generation.usage,
            "Generation received"
        );
        Ok(generation)
    }
}
