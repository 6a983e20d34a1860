//! Generative text service providers.
//!
//! Provides the [`GenerativeProvider`] trait used by the analysis orchestrator
//! and the counter-narrative generator, a concrete Ollama-compatible HTTP
//! implementation, and a scripted mock for tests.
//!
//! Use `create_provider()` to instantiate a provider from configuration.

pub mod ollama;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::GenerativeConfig;
use crate::error::{ConfigError, GenerativeError};

pub use ollama::OllamaProvider;

/// Sampling parameters forwarded to the service as `options`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// A single non-streaming generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub options: Option<SamplingOptions>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: SamplingOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Trait for generative text services.
///
/// Implementations return the raw `response` text. They never retry; callers
/// treat every error as a signal to use their fallback.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenerativeError>;

    /// Return the model name.
    fn model_name(&self) -> &str;
}

/// Create a generative provider from configuration.
///
/// Returns `Ok(None)` when the service is disabled.
pub fn create_provider(
    config: &GenerativeConfig,
) -> Result<Option<Arc<dyn GenerativeProvider>>, ConfigError> {
    if !config.enabled {
        return Ok(None);
    }
    Ok(Some(Arc::new(OllamaProvider::new(config)?)))
}

/// A scripted provider for tests.
///
/// Replies are returned in the order they were queued; once the queue is
/// empty every call gets the default reply, or fails with
/// [`GenerativeError::Connection`] when there is none. Every prompt is
/// recorded.
pub struct MockGenerativeProvider {
    model: String,
    replies: Mutex<VecDeque<Result<String, GenerativeError>>>,
    default_reply: Option<String>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl Default for MockGenerativeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerativeProvider {
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            replies: Mutex::new(VecDeque::new()),
            default_reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider that answers every call with the same text.
    pub fn with_response(text: &str) -> Self {
        Self {
            default_reply: Some(text.to_string()),
            ..Self::new()
        }
    }

    /// A provider that fails every call.
    pub fn failing() -> Self {
        Self::new()
    }

    pub fn queue_response(&self, text: &str) {
        self.lock_replies().push_back(Ok(text.to_string()));
    }

    pub fn queue_error(&self, error: GenerativeError) {
        self.lock_replies().push_back(Err(error));
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, GenerativeError>>> {
        self.replies.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl GenerativeProvider for MockGenerativeProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenerativeError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        if let Some(reply) = self.lock_replies().pop_front() {
            return reply;
        }
        self.default_reply
            .clone()
            .ok_or_else(|| GenerativeError::Connection {
                message: "mock provider has no queued replies".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
