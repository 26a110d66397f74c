mod types;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::{DispatchError, SmithError};

pub use types::{Generation, TokenUsage};

/// Text returned in place of a generation when the driver degrades a dispatch failure.
pub const DEGRADED_RESPONSE: &str = "(Error generating response)";

/// A backend capable of turning a prompt into generated text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_response(&self, prompt: &str) -> Result<Generation, DispatchError>;
}

/// Maps a provider name to a constructed backend.
pub trait ProviderFactory: Send + Sync {
    /// Build the backend registered under `name` (case-insensitive).
    fn resolve(&self, name: &str, config: &ProviderConfig)
        -> Result<Box<dyn LlmProvider>, SmithError>;

    /// Registered provider names.
    fn list_available(&self) -> Vec<String>;

    fn is_available(&self, name: &str) -> bool {
        let normalized = name.trim().to_lowercase();
        self.list_available().iter().any(|n| *n == normalized)
    }
}
