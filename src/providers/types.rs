use thiserror::Error;

/// Failures surfaced by the model client. Every variant is terminal for
/// the triggering request; nothing is retried automatically, and the
/// `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("The assistant is not initialized. Configure an API key before sending messages.")]
    NotInitialized,

    #[error("Access denied. Please check that your API key has the necessary permissions.")]
    AccessDenied,

    #[error("Unable to access model '{0}'. Please verify your API key is valid and has access to it.")]
    ModelUnavailable(String),

    #[error("Failed to generate a response. Please try again.")]
    GenerationFailed(String),
}

/// Connection parameters for a generation backend. `Debug` redacts the
/// API key so request logging can never leak it.
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}
