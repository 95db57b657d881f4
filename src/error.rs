use thiserror::Error;

/// Errors surfaced to the host by the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required file field was empty
    #[error("File record is missing {field}")]
    InvalidFile { field: &'static str },

    #[error("Invalid CDN url: {0}")]
    InvalidCdn(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failure reported by the object storage client, passed through as-is
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
