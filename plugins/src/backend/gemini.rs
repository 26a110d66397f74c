use async_trait::async_trait;
use serde_json::{json, Value};
use smith_core::api::{
    DispatchError, Generation, LlmProvider, ProviderConfig, ProviderInitError, TokenUsage,
};

use super::http::{build_client, post_json, read_secret};
use super::NO_RESPONSE;

/// `generateContent` backend; the endpoint already names the model.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiProvider {
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
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or(NO_RESPONSE)
        .to_string();
    let usage = body.get("usageMetadata").map(|u| TokenUsage {
        prompt_tokens: u.get("promptTokenCount").and_then(Value::as_u64),
        response_tokens: u.get("candidatesTokenCount").and_then(Value::as_u64),
    });
    Generation { text, usage }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_response(&self, prompt: &str) -> Result<Generation, DispatchError> {
        let payload = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        tracing::debug!(
            provider = "gemini",
            url = %self.endpoint,
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending generation request"
        );
        let req = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key);
        let body = post_json(req, &self.endpoint, &payload).await?;
        Ok(parse_generation(&body))
    }
}
