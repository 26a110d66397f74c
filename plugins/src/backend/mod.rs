//! HTTP backends behind the `LlmProvider` capability.
mod gemini;
mod http;
mod jules;
mod openai;

pub use gemini::GeminiProvider;
pub use jules::JulesProvider;
pub use openai::OpenAiProvider;

/// Text used when a well-formed reply carries no generated content.
pub const NO_RESPONSE: &str = "(No response)";
