//! Ollama-compatible generative provider.
//!
//! Talks to `POST {base_url}/api/generate` with `stream: false` and returns
//! the `response` field of the reply.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{GenerateRequest, GenerativeProvider, SamplingOptions};
use crate::config::GenerativeConfig;
use crate::error::{ConfigError, GenerativeError};

/// Request body for `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<SamplingOptions>,
}

/// Reply body from `/api/generate`. Only `response` is used.
#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: Option<String>,
}

/// HTTP client for an Ollama-compatible generation endpoint.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaProvider {
    /// Create a new provider from configuration.
    pub fn new(config: &GenerativeConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> GenerativeError {
        if err.is_timeout() {
            GenerativeError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            GenerativeError::Connection {
                message: err.to_string(),
            }
        }
    }

    /// Extract the generated text from a raw reply body.
    fn parse_reply(body: &str) -> Result<String, GenerativeError> {
        let reply: GenerateReply =
            serde_json::from_str(body).map_err(|e| GenerativeError::ResponseParse {
                message: format!("Invalid JSON: {}", e),
            })?;
        match reply.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenerativeError::EmptyResponse),
        }
    }
}

#[async_trait]
impl GenerativeProvider for OllamaProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenerativeError> {
        let url = self.endpoint();
        let body = GenerateBody {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options: request.options,
        };

        debug!(
            url = %url,
            model = %self.model,
            prompt_chars = request.prompt.len(),
            "Sending generate request"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let response_body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(GenerativeError::HttpStatus {
                status: status.as_u16(),
                body: response_body.chars().take(200).collect(),
            });
        }

        Self::parse_reply(&response_body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
