use thiserror::Error;

/// Failure while constructing a provider backend.
#[derive(Error, Debug)]
pub enum ProviderInitError {
    #[error("API key missing in environment variable: {0}")]
    MissingSecret(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Failure while a backend generates a response.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("{provider} provider is not implemented yet")]
    NotImplemented { provider: String },
}

impl DispatchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::NotImplemented { .. } => "not_implemented",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
