use thiserror::Error;

/// Failures surfaced to the user. None of these are fatal: the
/// terminal surface prints the `Display` text in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("API key is not provided")]
    MissingCredential,

    #[error("OpenAI Connection Error: {0}")]
    ConnectionError(String),

    #[error("Connection failed. Please check your API key.")]
    NotConnected,

    #[error("Error while fetching response: {0}")]
    RemoteError(String),

    #[error("Failed to render instruction: {0}")]
    Template(String),
}

impl AssistantError {
    /// Builds a `ConnectionError` keeping the full cause chain.
    pub fn connection(err: anyhow::Error) -> Self {
        AssistantError::ConnectionError(format!("{:#}", err))
    }

    /// Builds a `RemoteError` keeping the full cause chain.
    pub fn remote(err: anyhow::Error) -> Self {
        AssistantError::RemoteError(format!("{:#}", err))
    }
}
