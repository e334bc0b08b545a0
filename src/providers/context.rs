use std::sync::Arc;

use super::traits::TextModel;
use super::types::ModelError;

/// Handle to the configured generation backend, passed to the controller
/// at construction. Replaces a nullable global client: an unconfigured
/// context answers every call with `ModelError::NotInitialized` instead of
/// relying on a null check at each call site.
#[derive(Clone, Default)]
pub struct ModelContext {
    client: Option<Arc<dyn TextModel>>,
}

impl ModelContext {
    pub fn new(client: Arc<dyn TextModel>) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn uninitialized() -> Self {
        Self { client: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let client = self.client.as_ref().ok_or(ModelError::NotInitialized)?;
        client.generate(prompt).await
    }
}
