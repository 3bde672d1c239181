use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when asking the inference endpoint for recommendations
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("No inference credential configured")]
    NotConfigured,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    Status(u16),

    #[error("No text in response")]
    MissingText,

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid recommendations format: {0}")]
    InvalidShape(String),
}

/// One remote text-generation call
///
/// Implementations return the raw generated text; interpreting it is the
/// generator's job.
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        Ok(Self {
            base_url,
            model,
            api_key,
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
pub fn extract_text(body: &Value) -> Option<&str> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

#[async_trait]
impl InferenceTransport for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        tracing::debug!("Requesting recommendations from model {}", self.model);

        let response = self
            .client
            .post(self.url())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::warn!("Inference request failed: {} - {}", status, body);
            return Err(InferenceError::Status(status.as_u16()));
        }

        let json: Value = response.json().await?;

        extract_text(&json)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or(InferenceError::MissingText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_client_url() {
        let client = GeminiClient::new(
            "https://gemini.test/v1beta/".to_string(),
            "gemini-pro".to_string(),
            "key with space".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.url(),
            "https://gemini.test/v1beta/models/gemini-pro:generateContent?key=key%20with%20space"
        );
    }

    #[test]
    fn test_extract_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
        });
        assert_eq!(extract_text(&body), Some("[]"));
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_text(&json!({})), None);
    }
}
