//! Minimal Gemini `generateContent` client.
//!
//! Plain text in, plain text out. The response is not validated beyond
//! non-emptiness; tone and length guidance travels inside the prompt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Errors that can occur when talking to the provider.
#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("empty response")]
    Empty,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Gemini API client.
#[derive(Clone)]
pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .connect_timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Build a client from the `GEMINI_API_KEY` environment variable. A
    /// missing key yields a client whose requests fail; the service layer
    /// absorbs those into fallback text.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GEMINI_API_KEY").unwrap_or_default())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send one prompt and return the first candidate's text.
    pub async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<String, Error> {
        let request = ApiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: config,
        };

        let url = format!(
            "{API_BASE}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        let text = api_response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(Error::Empty);
        }

        Ok(text)
    }
}
