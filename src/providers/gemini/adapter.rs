use async_trait::async_trait;
use reqwest::Client;

use super::models::*;
use crate::providers::traits::TextModel;
use crate::providers::types::{ModelConfig, ModelError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini generateContent endpoint. Configured once at
/// startup; each `generate` call is a single request/response round trip.
pub struct GeminiClient {
    client: Client,
    config: ModelConfig,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Parse an API error response body into a loggable message.
    fn parse_error_message(status: reqwest::StatusCode, body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = parsed["error"]["message"].as_str() {
                return format!("HTTP {}: {}", status.as_u16(), msg);
            }
        }
        format!("HTTP {}: Request failed", status.as_u16())
    }

    fn generation_failed(detail: String) -> ModelError {
        tracing::error!("generation request failed: {}", detail);
        ModelError::GenerationFailed(detail)
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    fn model_id(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url(),
            self.config.model
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::generation_failed(format!("network error: {}", e)))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ModelError::AccessDenied);
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ModelError::ModelUnavailable(self.config.model.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::generation_failed(Self::parse_error_message(
                status, &body,
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Self::generation_failed(format!("invalid response: {}", e)))?;

        if let Some(error) = gemini_response.error {
            return Err(Self::generation_failed(
                error.message.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        gemini_response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().filter_map(|p| p.text).next())
            .ok_or_else(|| Self::generation_failed("no content in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(ModelConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: Some(server.uri()),
        })
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header_exists("x-goog-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Phishing is a social engineering attack."}]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let reply = client_for(&server).generate("What is phishing?").await.unwrap();
        assert_eq!(reply, "Phishing is a social engineering attack.");
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_access_denied() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        assert!(matches!(err, ModelError::AccessDenied));
    }

    #[tokio::test]
    async fn test_not_found_maps_to_model_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        match err {
            ModelError::ModelUnavailable(model) => assert_eq!(model, "gemini-2.0-flash"),
            other => panic!("expected ModelUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_maps_to_generation_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"message": "internal failure"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        match err {
            ModelError::GenerationFailed(detail) => assert!(detail.contains("internal failure")),
            other => panic!("expected GenerationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_generation_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        assert!(matches!(err, ModelError::GenerationFailed(_)));
    }
}
