use async_trait::async_trait;

use super::types::ModelError;

/// A hosted text-generation backend. One request in, one complete response
/// out; no streaming, no incremental updates.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// The model identifier requests are dispatched to.
    fn model_id(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}
